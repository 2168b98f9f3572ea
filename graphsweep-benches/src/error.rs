//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! that setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use graphsweep_core::{
    LoadError, PruneError, ShortestPathError, SpanningTreeError, synthetic::SyntheticError,
};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Loading the synthetic source failed.
    #[error("benchmark graph could not be loaded: {0}")]
    Load(#[from] LoadError),
    /// Pruning the benchmark graph failed.
    #[error("pruning failed: {0}")]
    Prune(#[from] PruneError),
    /// A warm-up shortest-path run failed.
    #[error("shortest-path computation failed: {0}")]
    ShortestPath(#[from] ShortestPathError),
    /// A warm-up spanning-tree run failed.
    #[error("spanning-tree computation failed: {0}")]
    SpanningTree(#[from] SpanningTreeError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
