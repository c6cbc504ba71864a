//! K-best Held-Karp configuration.

/// Hard limit on the number of locations.
///
/// The subset table allocates `2^n * n` slots of 24 bytes before any
/// candidate is stored: about 113 MB at 18 locations, and already 500 MB
/// at 20. Candidates add up to `k * 24` bytes per reachable state on top.
pub const MAX_SUPPORTED_NODES: usize = 18;

/// Order applied to tours whose closed costs are exactly equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Keep first-discovered order (stable sort over end node, then rank).
    #[default]
    Discovery,

    /// Order equal-cost paths and tours by their node sequence.
    ///
    /// Applied while the table is built as well as at extraction, so the
    /// result is the first K tours by `(cost, sequence)`.
    Lexicographic,
}

/// Configuration for the K-best tour search.
///
/// # Examples
///
/// ```
/// use u_tour::heldkarp::{KBestConfig, TieBreak};
///
/// let config = KBestConfig::default()
///     .with_k(5)
///     .with_max_nodes(12)
///     .with_tie_break(TieBreak::Lexicographic);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KBestConfig {
    /// Number of distinct tours to return.
    pub k: usize,

    /// Largest instance accepted. At most [`MAX_SUPPORTED_NODES`].
    pub max_nodes: usize,

    /// Ordering for exactly tied closed costs.
    pub tie_break: TieBreak,

    /// Accept negative edge costs.
    ///
    /// A Hamiltonian cycle repeats no subcycle, so negative edges do not
    /// break the dynamic program. Disable to reject them as input errors.
    pub allow_negative_edges: bool,

    /// Whether `run_many` spreads requests over rayon's pool.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for KBestConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_nodes: 16,
            tie_break: TieBreak::Discovery,
            allow_negative_edges: true,
            parallel: true,
        }
    }
}

impl KBestConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_allow_negative_edges(mut self, allow: bool) -> Self {
        self.allow_negative_edges = allow;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.k == 0 {
            return Err("k must be at least 1".into());
        }
        if self.max_nodes < 2 {
            return Err(format!("max_nodes must be at least 2, got {}", self.max_nodes));
        }
        if self.max_nodes > MAX_SUPPORTED_NODES {
            return Err(format!(
                "max_nodes must be at most {MAX_SUPPORTED_NODES}, got {}",
                self.max_nodes
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KBestConfig::default();
        assert_eq!(config.k, 3);
        assert_eq!(config.max_nodes, 16);
        assert_eq!(config.tie_break, TieBreak::Discovery);
        assert!(config.allow_negative_edges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_k() {
        assert!(KBestConfig::default().with_k(0).validate().is_err());
    }

    #[test]
    fn test_validate_node_ceiling() {
        assert!(KBestConfig::default().with_max_nodes(1).validate().is_err());
        assert!(KBestConfig::default()
            .with_max_nodes(MAX_SUPPORTED_NODES)
            .validate()
            .is_ok());
        assert!(KBestConfig::default()
            .with_max_nodes(MAX_SUPPORTED_NODES + 1)
            .validate()
            .is_err());
    }
}
