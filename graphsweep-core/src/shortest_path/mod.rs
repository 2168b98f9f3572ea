//! Single-source shortest paths without a priority queue.
//!
//! Each step scans every unvisited node for the smallest tentative distance
//! (first in node order on ties), marks it visited, and relaxes its outgoing
//! edges. The scan makes the algorithm `O(n²)`, which is fine for the small
//! benchmark graphs this crate targets. Weights are positive by
//! construction of [`Graph`], so relaxation never needs to revisit a node.

use thiserror::Error;
use tracing::instrument;

use crate::{
    error::define_error_codes,
    graph::{Graph, Weight},
};

/// Errors raised by [`shortest_paths`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ShortestPathError {
    /// The graph has no nodes.
    #[error("cannot compute shortest paths on an empty graph")]
    EmptyGraph,
    /// The requested source is not a node of the graph.
    #[error("source node {source_node} is outside the graph (node_count {node_count})")]
    SourceOutOfRange {
        /// Requested source node.
        source_node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ShortestPathError`] variants.
    enum ShortestPathErrorCode for ShortestPathError {
        /// The graph has no nodes.
        EmptyGraph => EmptyGraph => "SHORTEST_PATH_EMPTY_GRAPH",
        /// The requested source is not a node of the graph.
        SourceOutOfRange => SourceOutOfRange { .. } => "SHORTEST_PATH_SOURCE_OUT_OF_RANGE",
    }
}

/// Shortest-path cost from a fixed source to every node.
///
/// `None` stands for an infinite distance (unreachable node).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistanceMap {
    distances: Vec<Option<Weight>>,
}

impl DistanceMap {
    /// Returns the distance to `node`, or `None` when it is unreachable or
    /// out of range.
    #[must_use]
    pub fn get(&self, node: usize) -> Option<Weight> {
        self.distances.get(node).copied().flatten()
    }

    /// Returns `true` when `node` is reachable from the source.
    #[must_use]
    pub fn is_reachable(&self, node: usize) -> bool {
        self.get(node).is_some()
    }

    /// Returns the number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns `true` when no nodes are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Iterates `(node, distance)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Weight>)> + '_ {
        self.distances.iter().copied().enumerate()
    }
}

/// Node sequence from the source to every node.
///
/// Unreachable nodes map to an empty path; the source maps to `[source]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathMap {
    paths: Vec<Vec<usize>>,
}

impl PathMap {
    /// Returns the path to `node`, or `None` when `node` is out of range.
    #[must_use]
    pub fn get(&self, node: usize) -> Option<&[usize]> {
        self.paths.get(node).map(Vec::as_slice)
    }

    /// Returns the number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no nodes are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates `(node, path)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.paths.iter().map(Vec::as_slice).enumerate()
    }
}

/// Distances and paths from one source node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    distances: DistanceMap,
    paths: PathMap,
}

impl ShortestPaths {
    /// Returns the source node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the distance map.
    #[must_use]
    #[rustfmt::skip]
    pub const fn distances(&self) -> &DistanceMap { &self.distances }

    /// Returns the path map.
    #[must_use]
    #[rustfmt::skip]
    pub const fn paths(&self) -> &PathMap { &self.paths }

    /// Sums the weights of the edges along the recorded path to `node`.
    ///
    /// Returns `None` when the node is unreachable or the path uses an edge
    /// missing from `graph`.
    #[must_use]
    pub fn path_weight(&self, graph: &Graph, node: usize) -> Option<Weight> {
        let path = self.paths.get(node)?;
        if path.is_empty() {
            return None;
        }
        path.windows(2).try_fold(0, |total: Weight, pair| match pair {
            [from, to] => Some(total.saturating_add(graph.weight_between(*from, *to)?)),
            _ => None,
        })
    }
}

/// Computes distances and paths from `source` to every node of `graph`.
///
/// # Errors
/// Returns [`ShortestPathError::EmptyGraph`] for a graph without nodes and
/// [`ShortestPathError::SourceOutOfRange`] when `source` is not a node.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, Orientation, shortest_paths};
///
/// let graph = Graph::from_edges(
///     Orientation::Directed,
///     [Edge::new(0, 1, 4), Edge::new(1, 2, 1), Edge::new(0, 2, 10)],
/// )?;
/// let result = shortest_paths(&graph, 0)?;
/// assert_eq!(result.distances().get(2), Some(5));
/// assert_eq!(result.paths().get(2), Some(&[0, 1, 2][..]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.shortest_paths",
    err,
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn shortest_paths(graph: &Graph, source: usize) -> Result<ShortestPaths, ShortestPathError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(ShortestPathError::EmptyGraph);
    }
    if source >= node_count {
        return Err(ShortestPathError::SourceOutOfRange {
            source_node: source,
            node_count,
        });
    }

    let adjacency = graph.adjacency();
    let mut distances: Vec<Option<Weight>> = vec![None; node_count];
    let mut paths: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut visited = vec![false; node_count];
    distances[source] = Some(0);
    paths[source] = vec![source];

    while let Some((current, base)) = closest_unvisited(&distances, &visited) {
        visited[current] = true;
        for &(neighbour, weight) in &adjacency[current] {
            let candidate = base.saturating_add(weight);
            if distances[neighbour].is_none_or(|known| candidate < known) {
                distances[neighbour] = Some(candidate);
                let mut path = paths[current].clone();
                path.push(neighbour);
                paths[neighbour] = path;
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distances: DistanceMap { distances },
        paths: PathMap { paths },
    })
}

/// Finds the reachable unvisited node with the smallest tentative distance,
/// preferring the lowest node id on ties.
///
/// Returns `None` once every remaining node is unreachable.
fn closest_unvisited(distances: &[Option<Weight>], visited: &[bool]) -> Option<(usize, Weight)> {
    let mut best: Option<(usize, Weight)> = None;
    for (node, distance) in distances.iter().enumerate() {
        if visited[node] {
            continue;
        }
        let Some(distance) = *distance else {
            continue;
        };
        if best.is_none_or(|(_, current)| distance < current) {
            best = Some((node, distance));
        }
    }
    best
}

#[cfg(test)]
mod tests;
