//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so that benchmark
//! helper functions stay under the Clippy `too-many-arguments` threshold.

use std::fmt;

use graphsweep_core::Orientation;

/// Shape of a synthetic benchmark graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Edges added on top of the connected skeleton.
    pub extra_edges: usize,
    /// Edge orientation.
    pub orientation: Orientation,
}

impl GraphBenchParams {
    /// Sparse graph with twice as many extra edges as nodes.
    #[must_use]
    pub const fn sparse(node_count: usize, orientation: Orientation) -> Self {
        Self {
            node_count,
            extra_edges: node_count.saturating_mul(2),
            orientation,
        }
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},extra={},{}",
            self.node_count, self.extra_edges, self.orientation
        )
    }
}

/// Parameters for a pruning benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct PruneBenchParams {
    /// Graph shape.
    pub graph: GraphBenchParams,
    /// Percentage of edges to remove.
    pub percent: u8,
}

impl fmt::Display for PruneBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},p={}", self.graph, self.percent)
    }
}
