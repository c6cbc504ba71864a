//! Exact K-best round-trip tour optimization.
//!
//! Given a directed cost matrix over a small set of locations and a start
//! location, finds the K cheapest tours that leave the start, visit every
//! other location exactly once and return.
//!
//! - **Matrix**: [`matrix::CostMatrix`] (what the optimizer consumes) and
//!   [`matrix::LocationMatrix`] (names + nullable cells + metadata, the
//!   contract loaders produce).
//! - **Held-Karp**: K-best subset DP ([`heldkarp::solve`]), ranked
//!   reconstruction with deduplication ([`heldkarp::extract_top_k`]) and
//!   the [`heldkarp::KBestRunner`] that ties them together.
//! - **Report**: totals of other matrices (time, fare, transfers) along
//!   returned tours.
//!
//! # Example
//!
//! ```
//! use u_tour::heldkarp::{KBestConfig, KBestRunner, TourStatus};
//! use u_tour::matrix::CostMatrix;
//!
//! let matrix = CostMatrix::from_rows(&[
//!     [0.0, 1.0, 2.0, 3.0],
//!     [1.0, 0.0, 1.0, 2.0],
//!     [2.0, 1.0, 0.0, 1.0],
//!     [3.0, 2.0, 1.0, 0.0],
//! ])
//! .unwrap();
//!
//! let result = KBestRunner::run(&matrix, 0, &KBestConfig::default().with_k(3)).unwrap();
//! assert_eq!(result.status, TourStatus::Complete);
//! assert_eq!(result.tours[0].total_cost, 6.0);
//! ```
//!
//! # Architecture
//!
//! Acquiring travel metrics and combining several metrics into one
//! objective matrix are left to callers. Every call takes its matrix,
//! start and configuration explicitly; there is no global state.

pub mod error;
pub mod heldkarp;
pub mod matrix;
pub mod report;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::TourError;
