//! Fixture and weight distribution types for spanning-tree property tests.

use test_strategy::Arbitrary;

use crate::graph::Graph;

/// Shape of the generated graph and its edge weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WeightDistribution {
    /// Weights drawn from a wide range, so ties are rare.
    #[weight(2)]
    Unique,
    /// Weights drawn from a pool of one to three values, stressing
    /// tie-breaking.
    #[weight(3)]
    ManyIdentical,
    /// Random spanning tree plus roughly `0.5n` to `n` extra edges.
    #[weight(2)]
    Sparse,
    /// Edge probability between 0.7 and 0.95 over all node pairs.
    #[weight(2)]
    Dense,
    /// Several components with no edges between them.
    #[weight(2)]
    Disconnected,
}

/// Generated graph together with the distribution that produced it.
#[derive(Clone, Debug)]
pub(super) struct SpanningFixture {
    /// Undirected input graph.
    pub graph: Graph,
    /// Weight distribution used during generation.
    pub distribution: WeightDistribution,
}
