//! Named location matrix: the input contract handed over by loaders.

use super::cost::CostMatrix;
use crate::error::TourError;
use std::collections::BTreeMap;

/// Ordered location names plus a square matrix aligned with that order.
///
/// Cells are nullable so that loaders can pass "no route found" through
/// unchanged. `metadata` (units, provenance, query date...) is carried
/// along for reporting and never read by the optimizer.
///
/// With the `serde` feature, the name list also accepts the key `stations`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationMatrix {
    /// Location labels, index-aligned with matrix rows and columns.
    #[cfg_attr(feature = "serde", serde(alias = "stations"))]
    pub names: Vec<String>,

    /// Directed costs; `None` means no edge.
    pub matrix: Vec<Vec<Option<f64>>>,

    /// Free-form descriptive fields.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

impl LocationMatrix {
    /// Creates a location matrix without metadata.
    pub fn new(names: Vec<String>, matrix: Vec<Vec<Option<f64>>>) -> Self {
        Self {
            names,
            matrix,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of named locations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a location name to its index.
    ///
    /// # Errors
    ///
    /// [`TourError::UnknownLocation`] if no location has that name.
    pub fn index_of(&self, name: &str) -> Result<usize, TourError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TourError::UnknownLocation(name.to_string()))
    }

    /// Checks that names and matrix agree and that the matrix is square.
    pub fn validate(&self) -> Result<(), TourError> {
        let size = self.matrix.len();
        if self.names.len() != size {
            return Err(TourError::NameCountMismatch {
                names: self.names.len(),
                size,
            });
        }
        for (row, values) in self.matrix.iter().enumerate() {
            if values.len() != size {
                return Err(TourError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
        }
        Ok(())
    }

    /// Validates the contract and converts the cells into a [`CostMatrix`].
    pub fn cost_matrix(&self) -> Result<CostMatrix, TourError> {
        self.validate()?;
        CostMatrix::from_optional_rows(&self.matrix)
    }

    /// Whether `other` lists exactly the same locations in the same order.
    pub fn same_locations(&self, other: &LocationMatrix) -> bool {
        self.names == other.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationMatrix {
        LocationMatrix::new(
            vec!["Iidabashi".into(), "Tokyo".into(), "Ueno".into()],
            vec![
                vec![Some(0.0), Some(12.0), Some(15.0)],
                vec![Some(11.0), Some(0.0), None],
                vec![Some(14.0), Some(9.0), Some(0.0)],
            ],
        )
    }

    #[test]
    fn test_index_of() {
        let lm = sample();
        assert_eq!(lm.index_of("Tokyo"), Ok(1));
        assert_eq!(
            lm.index_of("Shibuya"),
            Err(TourError::UnknownLocation("Shibuya".into()))
        );
    }

    #[test]
    fn test_name_count_mismatch() {
        let mut lm = sample();
        lm.names.pop();
        assert_eq!(
            lm.cost_matrix(),
            Err(TourError::NameCountMismatch { names: 2, size: 3 })
        );
    }

    #[test]
    fn test_ragged_matrix() {
        let mut lm = sample();
        lm.matrix[2].push(Some(1.0));
        assert!(matches!(
            lm.validate(),
            Err(TourError::NotSquare { row: 2, len: 4, .. })
        ));
    }

    #[test]
    fn test_cost_matrix_keeps_missing_edges() {
        let m = sample().cost_matrix().unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.edge(0, 1), 12.0);
        assert!(!m.has_edge(1, 2));
    }

    #[test]
    fn test_metadata_is_passed_through() {
        let lm = sample().with_metadata("metric", "minutes");
        assert_eq!(lm.metadata.get("metric").map(String::as_str), Some("minutes"));
        assert!(lm.same_locations(&sample()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_station_document() {
        let json = r#"{
            "stations": ["A", "B"],
            "matrix": [[0, 3.5], [null, 0]],
            "metadata": {"metric": "minutes"}
        }"#;
        let lm: LocationMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(lm.names, vec!["A", "B"]);
        assert_eq!(lm.matrix[1][0], None);
        let m = lm.cost_matrix().unwrap();
        assert_eq!(m.edge(0, 1), 3.5);
    }
}
