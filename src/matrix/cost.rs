//! Directed cost matrix.

use crate::error::TourError;

/// Square matrix of directed travel costs, stored row-major.
///
/// Missing edges (`None`, NaN, or infinite inputs) are stored as
/// `f64::INFINITY`. The diagonal is kept as given but is never an edge:
/// [`edge`](Self::edge) reports `i -> i` as infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from dense rows.
    ///
    /// # Errors
    ///
    /// [`TourError::NotSquare`] if any row length differs from the row count.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TourError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            check_row(row, values.len(), n)?;
            costs.extend(values.iter().copied().map(normalize));
        }
        Ok(Self { n, costs })
    }

    /// Builds a matrix from rows where `None` marks a missing edge.
    pub fn from_optional_rows<R: AsRef<[Option<f64>]>>(rows: &[R]) -> Result<Self, TourError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            check_row(row, values.len(), n)?;
            costs.extend(
                values
                    .iter()
                    .map(|v| v.map_or(f64::INFINITY, normalize)),
            );
        }
        Ok(Self { n, costs })
    }

    /// Builds an `n x n` matrix by evaluating `f(from, to)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(n: usize, mut f: F) -> Self {
        let mut costs = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                costs.push(normalize(f(i, j)));
            }
        }
        Self { n, costs }
    }

    /// Number of locations.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Cost of the directed edge `from -> to`, infinite when absent.
    #[inline]
    pub fn edge(&self, from: usize, to: usize) -> f64 {
        if from == to {
            f64::INFINITY
        } else {
            self.costs[from * self.n + to]
        }
    }

    /// Whether `from -> to` is a usable edge.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edge(from, to).is_finite()
    }

    /// Sum of edge costs along consecutive pairs of `path`.
    ///
    /// Returns infinity if the path uses a missing edge or a self-loop.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.edge(w[0], w[1])).sum()
    }

    /// First off-diagonal edge with a negative cost, in row-major order.
    pub fn first_negative_edge(&self) -> Option<(usize, usize, f64)> {
        (0..self.n)
            .flat_map(|i| (0..self.n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j)
            .map(|(i, j)| (i, j, self.costs[i * self.n + j]))
            .find(|&(_, _, c)| c < 0.0)
    }
}

fn check_row(row: usize, len: usize, expected: usize) -> Result<(), TourError> {
    if len != expected {
        return Err(TourError::NotSquare { row, len, expected });
    }
    Ok(())
}

#[inline]
fn normalize(cost: f64) -> f64 {
    if cost.is_finite() {
        cost
    } else {
        f64::INFINITY
    }
}
