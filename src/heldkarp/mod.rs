//! Exact K-best round-trip tours via the Held-Karp subset DP.
//!
//! Instead of the single cheapest path per `(visited set, end node)` state,
//! every state keeps its K cheapest partial paths with ranked back-pointers.
//! Closing the full-set states back to the start and walking the pointers
//! yields the K cheapest distinct tours.
//!
//! # Exactness
//!
//! Truncating each state to K candidates loses nothing: if a partial path
//! is not among the K cheapest for its state, those K cheaper paths each
//! combine with its remaining suffix into K distinct tours that are no more
//! expensive, so no top-K tour can go through it. Under
//! [`TieBreak::Lexicographic`] states order equal costs by node sequence
//! before truncating, and the same argument yields the first K tours by
//! `(cost, sequence)`.
//!
//! # Complexity
//!
//! Memory `O(2^n * n * K)`, time `O(2^n * n^2 * K)`. The practical ceiling
//! is around 16 locations; [`MAX_SUPPORTED_NODES`] is the hard limit, set
//! by the `2^n * n` state slots [`solve`] allocates up front.
//!
//! # References
//!
//! - Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"
//! - Bellman (1962), "Dynamic Programming Treatment of the Travelling Salesman Problem"

mod config;
mod reconstruct;
mod runner;
mod table;

pub use config::{KBestConfig, TieBreak, MAX_SUPPORTED_NODES};
pub use reconstruct::{extract_top_k, Tour};
pub use runner::{KBestResult, KBestRunner, RankedTour, TourStatus};
pub use table::{solve, Candidate, DpTable};
