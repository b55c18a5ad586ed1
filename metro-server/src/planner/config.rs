//! Search configuration for the path finder.

use serde::{Deserialize, Serialize};

/// Which path search to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Frontier search with per-station pruning. The first result is the
    /// shortest path; later results are alternatives, not guaranteed to be
    /// the next-shortest.
    #[default]
    Ranked,

    /// Yen's k-shortest simple paths. Slower, but every result is exact.
    Exact,
}

/// Configuration parameters for path search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of paths returned when a request does not say.
    pub default_limit: usize,

    /// Largest number of paths a single request may ask for.
    pub max_limit: usize,

    /// Frontier pops allowed per station per requested path.
    /// The ranked search stops after `nodes * limit * iteration_factor` pops.
    pub iteration_factor: usize,

    /// Default search strategy.
    pub strategy: SearchStrategy,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_limit: usize,
        max_limit: usize,
        iteration_factor: usize,
        strategy: SearchStrategy,
    ) -> Self {
        Self {
            default_limit,
            max_limit,
            iteration_factor,
            strategy,
        }
    }

    /// Iteration cap for a graph with `node_count` stations.
    pub fn iteration_cap(&self, node_count: usize, limit: usize) -> usize {
        node_count
            .max(1)
            .saturating_mul(limit)
            .saturating_mul(self.iteration_factor.max(1))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 3,
            max_limit: 10,
            iteration_factor: 64,
            strategy: SearchStrategy::Ranked,
        }
    }
}
