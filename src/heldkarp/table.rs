//! Subset DP table holding the K cheapest partial paths per state.
//!
//! A state is `(mask, node)`: the set of visited locations (always
//! including the start) and the location the partial path ends at. Each
//! state keeps up to K [`Candidate`]s sorted by cost, each pointing back
//! to a ranked candidate of the state it was extended from.

use super::config::{TieBreak, MAX_SUPPORTED_NODES};
use crate::error::TourError;
use crate::matrix::CostMatrix;

/// One ranked way of reaching a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Accumulated cost from the start.
    pub cost: f64,

    /// Node visited just before this state's node.
    pub prev: usize,

    /// Rank of the extended candidate in `(mask \ {node}, prev)`.
    ///
    /// `None` when the path leaves the start directly.
    pub prev_rank: Option<usize>,
}

/// Completed K-best subset table for one `(matrix, start, k)` request.
///
/// Borrows the matrix it was built from so that tours can be closed
/// against it. Dropped once tours have been extracted.
#[derive(Debug)]
pub struct DpTable<'a> {
    matrix: &'a CostMatrix,
    start: usize,
    k: usize,
    tie_break: TieBreak,
    states: Vec<Vec<Candidate>>,
}

impl<'a> DpTable<'a> {
    pub fn matrix(&self) -> &'a CostMatrix {
        self.matrix
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Candidates kept per state, and tours extracted by default.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Ordering applied to equal-cost candidates while the table was built.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Mask with every location visited.
    pub fn full_mask(&self) -> usize {
        (1 << self.size()) - 1
    }

    /// Ranked candidates of `(mask, node)`, empty if the state is unreachable.
    pub fn candidates(&self, mask: usize, node: usize) -> &[Candidate] {
        self.states
            .get(mask * self.size() + node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Node sequence from the start to `node` of the candidate at `rank`
    /// in `(mask, node)`, both ends included.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not a stored candidate of the state.
    pub fn path(&self, mask: usize, node: usize, rank: usize) -> Vec<usize> {
        trace(&self.states, self.size(), mask, node, rank)
    }

    /// Whether any path visits every location using finite edges only.
    ///
    /// This does not look at the closing edges back to the start.
    pub fn is_feasible(&self) -> bool {
        let full = self.full_mask();
        (0..self.size())
            .filter(|&j| j != self.start)
            .any(|j| !self.candidates(full, j).is_empty())
    }

    /// Number of reachable states.
    pub fn state_count(&self) -> usize {
        self.states.iter().filter(|s| !s.is_empty()).count()
    }
}

/// Builds the K-best subset table.
///
/// Masks are processed in increasing numeric order. Removing a node from a
/// mask always yields a smaller number, so every predecessor state is final
/// by the time it is extended.
///
/// Extensions through missing edges are dropped instead of being stored
/// with infinite cost. Sorting puts finite candidates first anyway, and an
/// infinite partial path can never close into a finite tour.
///
/// Candidates of equal cost keep discovery order under
/// [`TieBreak::Discovery`]. Under [`TieBreak::Lexicographic`] they are
/// ordered by their node sequence before truncation, so every state keeps
/// its K smallest paths by `(cost, sequence)` and the lexicographically
/// first tours of a tie survive to extraction.
///
/// # Memory
///
/// The table reserves `2^n * n` state slots up front, one empty `Vec`
/// each (24 bytes on 64-bit targets) before any candidate is stored:
/// about 6 MB at 14 locations and 113 MB at 18. Each reachable state then
/// holds up to `k` candidates of 24 bytes.
///
/// # Errors
///
/// Rejects matrices with fewer than 2 or more than [`MAX_SUPPORTED_NODES`]
/// locations, an out-of-range start, and `k == 0`.
pub fn solve(
    matrix: &CostMatrix,
    start: usize,
    k: usize,
    tie_break: TieBreak,
) -> Result<DpTable<'_>, TourError> {
    let n = matrix.size();
    if n < 2 {
        return Err(TourError::TooFewNodes(n));
    }
    if n > MAX_SUPPORTED_NODES {
        return Err(TourError::TooManyNodes {
            n,
            max: MAX_SUPPORTED_NODES,
        });
    }
    if start >= n {
        return Err(TourError::StartOutOfRange { start, n });
    }
    if k == 0 {
        return Err(TourError::InvalidConfig("k must be at least 1".into()));
    }

    let full = (1usize << n) - 1;
    let start_mask = 1usize << start;
    let mut states: Vec<Vec<Candidate>> = vec![Vec::new(); (full + 1) * n];

    // Base: start -> j
    for j in (0..n).filter(|&j| j != start) {
        let cost = matrix.edge(start, j);
        if cost.is_finite() {
            states[(start_mask | (1 << j)) * n + j].push(Candidate {
                cost,
                prev: start,
                prev_rank: None,
            });
        }
    }

    for mask in (start_mask + 1)..=full {
        if mask & start_mask == 0 {
            continue;
        }

        for j in members(mask, n).filter(|&j| j != start) {
            let prev_mask = mask ^ (1 << j);
            if prev_mask == start_mask {
                continue; // base state, already seeded
            }

            let mut merged = Vec::new();
            for m in members(prev_mask, n).filter(|&m| m != start) {
                let step = matrix.edge(m, j);
                if !step.is_finite() {
                    continue;
                }
                for (rank, c) in states[prev_mask * n + m].iter().enumerate() {
                    let cost = c.cost + step;
                    if cost.is_finite() {
                        merged.push(Candidate {
                            cost,
                            prev: m,
                            prev_rank: Some(rank),
                        });
                    }
                }
            }

            if merged.is_empty() {
                continue;
            }
            // Stable: equal costs keep discovery order (m ascending, then rank).
            merged.sort_by(|a, b| a.cost.total_cmp(&b.cost));
            if tie_break == TieBreak::Lexicographic {
                // Every candidate ends at j, so comparing the paths up to
                // the predecessor compares the whole sequences.
                order_leading_ties(&mut merged, k, |c| match c.prev_rank {
                    Some(rank) => trace(&states, n, prev_mask, c.prev, rank),
                    None => vec![c.prev],
                });
            }
            merged.truncate(k);
            states[mask * n + j] = merged;
        }
    }

    let table = DpTable {
        matrix,
        start,
        k,
        tie_break,
        states,
    };
    log::debug!(
        "subset table built: n={n}, start={start}, k={k}, tie_break={tie_break:?}, reachable states={}",
        table.state_count()
    );
    Ok(table)
}

/// Re-sorts each run of equal costs that starts within the first `k`
/// candidates by `key`. Runs entirely past the cutoff are truncated anyway.
fn order_leading_ties<F>(sorted: &mut [Candidate], k: usize, key: F)
where
    F: Fn(&Candidate) -> Vec<usize>,
{
    let mut i = 0;
    while i < sorted.len().min(k) {
        let cost = sorted[i].cost;
        let end = i + sorted[i..].iter().take_while(|c| c.cost == cost).count();
        if end - i > 1 {
            sorted[i..end].sort_by_cached_key(&key);
        }
        i = end;
    }
}

/// Follows predecessor links from `(mask, node)` at `rank` back to the
/// start and returns the visited nodes in travel order.
fn trace(
    states: &[Vec<Candidate>],
    n: usize,
    mask: usize,
    node: usize,
    rank: usize,
) -> Vec<usize> {
    let (mut mask, mut node, mut rank) = (mask, node, rank);
    let mut reversed = vec![node];
    loop {
        let c = states[mask * n + node][rank];
        reversed.push(c.prev);
        match c.prev_rank {
            Some(prev_rank) => {
                mask ^= 1 << node;
                node = c.prev;
                rank = prev_rank;
            }
            None => break,
        }
    }
    reversed.reverse();
    reversed
}

/// Nodes contained in `mask`, ascending.
#[inline]
fn members(mask: usize, n: usize) -> impl Iterator<Item = usize> {
    (0..n).filter(move |&i| mask & (1 << i) != 0)
}
