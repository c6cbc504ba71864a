//! Closing, ranking and walk-back of complete tours.

use super::config::TieBreak;
use super::table::DpTable;
use std::collections::HashSet;

/// A closed tour: starts and ends at the start node, visits every other
/// node exactly once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cost: f64,
    nodes: Vec<usize>,
}

impl Tour {
    /// Total cost including the closing edge.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Node sequence of length `n + 1`.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}

/// A full-mask candidate closed back to the start.
#[derive(Debug, Clone, Copy)]
struct Closing {
    cost: f64,
    end: usize,
    rank: usize,
}

/// Extracts up to `table.k()` distinct tours, cheapest first.
///
/// Every candidate of every `(ALL, j)` state is closed with `j -> start`
/// and the closings are stably sorted by cost. Closings through a missing
/// edge are never selected. Tours are reconstructed in that order and
/// repeated node sequences are skipped, so fewer than `k` tours come back
/// when fewer distinct tours exist.
///
/// Exactly tied closings are ordered by the table's [`TieBreak`]. A table
/// built with [`TieBreak::Lexicographic`] has kept the smallest sequences
/// of every tie, so the tours returned are the first `k` by
/// `(cost, sequence)` over all tours.
pub fn extract_top_k(table: &DpTable<'_>) -> Vec<Tour> {
    let k = table.k();
    let tie_break = table.tie_break();
    let closings = close_tours(table);
    let mut accepted: Vec<Tour> = Vec::with_capacity(k.min(closings.len()));
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    let mut i = 0;
    while i < closings.len() && accepted.len() < k {
        let group_end = match tie_break {
            TieBreak::Discovery => i + 1,
            TieBreak::Lexicographic => {
                let cost = closings[i].cost;
                i + closings[i..].iter().take_while(|c| c.cost == cost).count()
            }
        };

        let mut group: Vec<Tour> = closings[i..group_end]
            .iter()
            .map(|c| Tour {
                cost: c.cost,
                nodes: walk_back(table, c.end, c.rank),
            })
            .collect();
        if tie_break == TieBreak::Lexicographic {
            group.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        }

        for tour in group {
            if accepted.len() == k {
                break;
            }
            if seen.contains(&tour.nodes) {
                log::warn!("skipping repeated tour {:?}", tour.nodes);
                continue;
            }
            log::trace!("tour #{}: cost={} nodes={:?}", accepted.len() + 1, tour.cost, tour.nodes);
            seen.insert(tour.nodes.clone());
            accepted.push(tour);
        }
        i = group_end;
    }

    accepted
}

/// Closes every full-mask candidate, sorted ascending by closed cost.
fn close_tours(table: &DpTable<'_>) -> Vec<Closing> {
    let start = table.start();
    let full = table.full_mask();
    let matrix = table.matrix();

    let mut closings = Vec::new();
    for end in (0..table.size()).filter(|&j| j != start) {
        let back = matrix.edge(end, start);
        for (rank, c) in table.candidates(full, end).iter().enumerate() {
            let cost = c.cost + back;
            if cost.is_finite() {
                closings.push(Closing { cost, end, rank });
            }
        }
    }
    closings.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    closings
}

/// Full tour ending at `end` with the candidate at `rank`, closed at the start.
fn walk_back(table: &DpTable<'_>, end: usize, rank: usize) -> Vec<usize> {
    let mut nodes = table.path(table.full_mask(), end, rank);
    nodes.push(table.start());
    nodes
}
