//! Reachability checks used to guard pruning.
//!
//! Undirected graphs are connected when a breadth-first walk from node `0`
//! reaches every node. Directed graphs must be strongly connected, which is
//! checked by walking from node `0` over both the forward and the reversed
//! arcs.

use std::collections::VecDeque;

use crate::graph::{Graph, Orientation, Weight};

/// Returns `true` when `graph` is connected under its orientation's
/// definition.
///
/// Graphs with zero or one node are trivially connected.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, Orientation, is_connected};
///
/// let path = [Edge::new(0, 1, 1), Edge::new(1, 2, 1)];
/// let undirected = Graph::from_edges(Orientation::Undirected, path)?;
/// assert!(is_connected(&undirected));
///
/// // A directed path cannot walk back from node 2.
/// let directed = Graph::from_edges(Orientation::Directed, path)?;
/// assert!(!is_connected(&directed));
/// # Ok::<(), graphsweep_core::GraphError>(())
/// ```
#[must_use]
pub fn is_connected(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    if node_count <= 1 {
        return true;
    }
    if reachable_count(&graph.adjacency(), 0) != node_count {
        return false;
    }
    match graph.orientation() {
        Orientation::Undirected => true,
        Orientation::Directed => reachable_count(&graph.reverse_adjacency(), 0) == node_count,
    }
}

/// Counts the nodes reachable from `start` (inclusive) over `adjacency`.
///
/// Returns `0` when `start` is outside the adjacency range.
#[must_use]
pub fn reachable_count(adjacency: &[Vec<(usize, Weight)>], start: usize) -> usize {
    if start >= adjacency.len() {
        return 0;
    }
    let mut visited = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    let mut count = 1;

    while let Some(node) = queue.pop_front() {
        for &(neighbour, _) in &adjacency[node] {
            if !visited[neighbour] {
                visited[neighbour] = true;
                count += 1;
                queue.push_back(neighbour);
            }
        }
    }
    count
}
