//! Error taxonomy for tour optimization requests.
//!
//! Only structural problems are errors. An instance with no feasible tour,
//! or with fewer tours than requested, is a normal outcome reported through
//! [`TourStatus`](crate::heldkarp::TourStatus).

use thiserror::Error;

/// Errors that reject a request before any dynamic programming is done.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TourError {
    /// A matrix row does not have as many entries as there are rows.
    #[error("matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// The location name list and the matrix disagree on size.
    #[error("{names} location names for a {size}x{size} matrix")]
    NameCountMismatch { names: usize, size: usize },

    /// A tour needs the start plus at least one other location.
    #[error("at least 2 locations are required, got {0}")]
    TooFewNodes(usize),

    /// The subset table would not fit the configured node ceiling.
    #[error("{n} locations exceed the configured ceiling of {max}")]
    TooManyNodes { n: usize, max: usize },

    /// Start index is not a node of the matrix.
    #[error("start index {start} is out of range for {n} locations")]
    StartOutOfRange { start: usize, n: usize },

    /// Start name is not present in the location list.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// An auxiliary matrix lists its locations in a different order.
    #[error("location order of matrix '{0}' does not match the objective matrix")]
    NameOrderMismatch(String),

    /// A negative edge was found while negative edges are disallowed.
    #[error("negative edge cost {cost} from {from} to {to}")]
    NegativeEdge { from: usize, to: usize, cost: f64 },

    /// Configuration rejected by [`KBestConfig::validate`](crate::heldkarp::KBestConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = TourError::NotSquare {
            row: 2,
            len: 3,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "matrix is not square: row 2 has 3 entries, expected 4"
        );

        let err = TourError::UnknownLocation("Ueno".into());
        assert_eq!(err.to_string(), "unknown location: Ueno");
    }
}
