//! Per-tour totals over auxiliary matrices.

use crate::error::TourError;
use crate::heldkarp::{KBestResult, RankedTour};
use crate::matrix::{CostMatrix, LocationMatrix};
use std::fmt;

/// Sums `matrix` along consecutive pairs of `nodes`.
///
/// Any matrix over the same locations works, not only the objective one.
/// A missing edge on the path makes the total infinite.
pub fn path_total(matrix: &CostMatrix, nodes: &[usize]) -> f64 {
    matrix.path_cost(nodes)
}

/// Renders a node sequence as `A -> B -> A`.
///
/// Indices without a name are shown as `#<index>`.
pub fn route_label<S: AsRef<str>>(names: &[S], nodes: &[usize]) -> String {
    nodes
        .iter()
        .map(|&i| {
            names
                .get(i)
                .map_or_else(|| format!("#{i}"), |s| s.as_ref().to_string())
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A ranked tour annotated with totals from other matrices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourReport {
    pub rank: usize,
    /// Location names joined with arrows.
    pub route: String,
    /// Total on the objective matrix the tour was optimized for.
    pub objective: f64,
    /// `(label, total)` per auxiliary matrix, in the order given.
    pub totals: Vec<(String, f64)>,
}

impl TourReport {
    /// Builds the report of a single tour.
    ///
    /// # Errors
    ///
    /// [`TourError::NameOrderMismatch`] if an auxiliary matrix does not list
    /// the objective's locations in the same order, or any shape error of
    /// an auxiliary matrix.
    pub fn build(
        objective: &LocationMatrix,
        tour: &RankedTour,
        aux: &[(&str, &LocationMatrix)],
    ) -> Result<Self, TourError> {
        let matrices = aligned(objective, aux)?;
        Ok(Self::with_matrices(objective, tour, &matrices))
    }

    /// Builds reports for every tour of `result`, converting each
    /// auxiliary matrix once.
    pub fn build_all(
        objective: &LocationMatrix,
        result: &KBestResult,
        aux: &[(&str, &LocationMatrix)],
    ) -> Result<Vec<Self>, TourError> {
        let matrices = aligned(objective, aux)?;
        Ok(result
            .tours
            .iter()
            .map(|tour| Self::with_matrices(objective, tour, &matrices))
            .collect())
    }

    /// Total for `label`, if that matrix was part of the report.
    pub fn total(&self, label: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, v)| v)
    }

    fn with_matrices(
        objective: &LocationMatrix,
        tour: &RankedTour,
        matrices: &[(String, CostMatrix)],
    ) -> Self {
        Self {
            rank: tour.rank,
            route: route_label(&objective.names, &tour.nodes),
            objective: tour.total_cost,
            totals: matrices
                .iter()
                .map(|(label, m)| (label.clone(), path_total(m, &tour.nodes)))
                .collect(),
        }
    }
}

impl fmt::Display for TourReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.rank)?;
        writeln!(f, "Route: {}", self.route)?;
        write!(f, "Objective: {:.6}", self.objective)?;
        for (label, total) in &self.totals {
            write!(f, "\n{label}: {total:.2}")?;
        }
        Ok(())
    }
}

fn aligned(
    objective: &LocationMatrix,
    aux: &[(&str, &LocationMatrix)],
) -> Result<Vec<(String, CostMatrix)>, TourError> {
    aux.iter()
        .map(|&(label, lm)| {
            if !objective.same_locations(lm) {
                return Err(TourError::NameOrderMismatch(label.to_string()));
            }
            Ok((label.to_string(), lm.cost_matrix()?))
        })
        .collect()
}
