//! Request orchestration: validation, table construction, extraction.

use super::config::KBestConfig;
use super::reconstruct::{extract_top_k, Tour};
use super::table::solve;
use crate::error::TourError;
use crate::matrix::{CostMatrix, LocationMatrix};

/// Outcome of a request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TourStatus {
    /// All K requested tours were found.
    Complete,
    /// Fewer than K distinct tours exist; all of them are returned.
    Partial,
    /// No tour uses only finite edges.
    Infeasible,
}

/// A tour with its 1-based rank.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedTour {
    /// 1 for the cheapest tour.
    pub rank: usize,
    /// Sum of edge costs including the closing edge.
    pub total_cost: f64,
    /// Node indices, starting and ending at the start node.
    pub nodes: Vec<usize>,
}

/// Result of a K-best tour request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KBestResult {
    /// Start node of every tour.
    pub start: usize,

    /// Whether K tours, fewer, or none were found.
    pub status: TourStatus,

    /// Tours in non-decreasing cost order.
    pub tours: Vec<RankedTour>,

    /// Reachable subset states in the table that produced the tours.
    pub states: usize,
}

impl KBestResult {
    /// The cheapest tour, if any.
    pub fn best(&self) -> Option<&RankedTour> {
        self.tours.first()
    }

    pub fn is_feasible(&self) -> bool {
        self.status != TourStatus::Infeasible
    }
}

/// Runs exact K-best tour searches.
pub struct KBestRunner;

impl KBestRunner {
    /// Finds the `config.k` cheapest distinct tours from `start`.
    ///
    /// # Errors
    ///
    /// Structural problems only: invalid configuration, too few or too many
    /// locations, bad start index, or a negative edge when those are
    /// disallowed. An instance without tours is reported as
    /// [`TourStatus::Infeasible`].
    pub fn run(
        matrix: &CostMatrix,
        start: usize,
        config: &KBestConfig,
    ) -> Result<KBestResult, TourError> {
        config.validate().map_err(TourError::InvalidConfig)?;

        let n = matrix.size();
        if n > config.max_nodes {
            return Err(TourError::TooManyNodes {
                n,
                max: config.max_nodes,
            });
        }
        if let Some((from, to, cost)) = matrix.first_negative_edge() {
            if !config.allow_negative_edges {
                return Err(TourError::NegativeEdge { from, to, cost });
            }
            log::warn!("negative edge cost {cost} from {from} to {to}");
        }

        log::debug!("k-best tours: n={n}, start={start}, k={}", config.k);

        let table = solve(matrix, start, config.k, config.tie_break)?;
        let states = table.state_count();
        let tours = if table.is_feasible() {
            extract_top_k(&table)
        } else {
            Vec::new()
        };
        drop(table);

        let status = if tours.is_empty() {
            log::info!("no tour from node {start} uses only available edges");
            TourStatus::Infeasible
        } else if tours.len() < config.k {
            TourStatus::Partial
        } else {
            TourStatus::Complete
        };

        Ok(KBestResult {
            start,
            status,
            tours: rank(tours),
            states,
        })
    }

    /// Same as [`run`](Self::run) with the start given by name.
    ///
    /// # Errors
    ///
    /// Additionally fails when `locations` is malformed or does not
    /// contain `start`.
    pub fn run_named(
        locations: &LocationMatrix,
        start: &str,
        config: &KBestConfig,
    ) -> Result<KBestResult, TourError> {
        let matrix = locations.cost_matrix()?;
        let start = locations.index_of(start)?;
        Self::run(&matrix, start, config)
    }

    /// Runs independent requests for several start nodes.
    ///
    /// Results are returned in the order of `starts`. With the `parallel`
    /// feature and `config.parallel` set, requests run on rayon's pool.
    pub fn run_many(
        matrix: &CostMatrix,
        starts: &[usize],
        config: &KBestConfig,
    ) -> Vec<Result<KBestResult, TourError>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if config.parallel {
                return starts
                    .par_iter()
                    .map(|&start| Self::run(matrix, start, config))
                    .collect();
            }
        }

        starts
            .iter()
            .map(|&start| Self::run(matrix, start, config))
            .collect()
    }
}

fn rank(tours: Vec<Tour>) -> Vec<RankedTour> {
    tours
        .into_iter()
        .enumerate()
        .map(|(i, tour)| RankedTour {
            rank: i + 1,
            total_cost: tour.cost(),
            nodes: tour.into_nodes(),
        })
        .collect()
}
