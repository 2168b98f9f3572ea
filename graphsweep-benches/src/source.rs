//! Seeded benchmark inputs.

use std::num::NonZeroUsize;

use graphsweep_core::{
    Graph, GraphSource,
    synthetic::{SyntheticGraphConfig, SyntheticGraphSource},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Largest edge weight in benchmark graphs.
pub const MAX_WEIGHT: u64 = 1_000;

/// Builds a seeded [`SyntheticGraphSource`] named after `params`.
///
/// # Errors
/// Returns [`BenchSetupError::Synthetic`] when the parameters are invalid.
pub fn bench_source(
    params: GraphBenchParams,
    seed: u64,
) -> Result<SyntheticGraphSource, BenchSetupError> {
    let config = SyntheticGraphConfig::new(params.node_count, params.extra_edges, seed)
        .with_orientation(params.orientation)
        .with_max_weight(MAX_WEIGHT);
    Ok(SyntheticGraphSource::new(params.to_string(), config)?)
}

/// Loads the connected graph described by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::Synthetic`] when the parameters are invalid
/// and [`BenchSetupError::Load`] when generation fails.
pub fn bench_graph(params: GraphBenchParams, seed: u64) -> Result<Graph, BenchSetupError> {
    Ok(bench_source(params, seed)?.load()?)
}

/// Draws `count` source nodes below `node_count`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero.
pub fn source_nodes(
    node_count: usize,
    count: usize,
    seed: u64,
) -> Result<Vec<usize>, BenchSetupError> {
    let bound = NonZeroUsize::new(node_count).ok_or(BenchSetupError::ZeroValue {
        context: "source node range",
    })?;
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..count).map(|_| rng.gen_range(0..bound.get())).collect())
}
