//! Algorithm selection for sweep inputs.

use std::{fmt, str::FromStr};

use super::ExperimentError;

/// Graph algorithm timed at each sweep point.
///
/// # Examples
/// ```
/// use graphsweep_core::Algorithm;
///
/// assert_eq!("dijkstra".parse::<Algorithm>()?, Algorithm::ShortestPath);
/// assert_eq!("MST".parse::<Algorithm>()?, Algorithm::SpanningTree);
/// assert!("kruskal".parse::<Algorithm>().is_err());
/// # Ok::<(), graphsweep_core::ExperimentError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// Single-source shortest paths from the configured source node.
    ShortestPath,
    /// Minimum spanning tree over the undirected view of the graph.
    SpanningTree,
}

impl Algorithm {
    /// Returns the canonical name used in reports and output paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortestPath => "dijkstra",
            Self::SpanningTree => "boruvka",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ExperimentError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "shortest-path" | "shortest_path" => Ok(Self::ShortestPath),
            "boruvka" | "spanning-tree" | "spanning_tree" | "mst" => Ok(Self::SpanningTree),
            _ => Err(ExperimentError::UnknownAlgorithm {
                name: raw.to_owned(),
            }),
        }
    }
}
