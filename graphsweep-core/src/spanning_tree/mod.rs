//! Minimum spanning tree construction by Borůvka rounds.
//!
//! Every round picks, for each fragment of the partially built tree, its
//! cheapest edge leaving the fragment, then merges along all picked edges.
//! Candidates are ranked by `(weight, edge index)`, so equal weights resolve
//! to the first edge in iteration order and the picked edges never close a
//! cycle. The fragment count at least halves per round.

mod union_find;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    error::define_error_codes,
    graph::{Edge, Graph, Orientation, Weight},
};

use self::union_find::DisjointSet;

/// Errors raised by [`minimum_spanning_tree`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SpanningTreeError {
    /// The graph has no nodes.
    #[error("cannot compute a spanning tree for an empty graph")]
    EmptyGraph,
    /// A round found no safe edge before the tree spanned every node.
    #[error(
        "graph with {node_count} nodes cannot be spanned: {components} components remain \
         after {tree_edges} tree edges"
    )]
    DisconnectedInput {
        /// Number of nodes in the input graph.
        node_count: usize,
        /// Tree edges accepted before progress stopped.
        tree_edges: usize,
        /// Fragments left unmerged.
        components: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SpanningTreeError`] variants.
    enum SpanningTreeErrorCode for SpanningTreeError {
        /// The graph has no nodes.
        EmptyGraph => EmptyGraph => "SPANNING_TREE_EMPTY_GRAPH",
        /// The graph cannot be fully spanned.
        DisconnectedInput => DisconnectedInput { .. } => "SPANNING_TREE_DISCONNECTED_INPUT",
    }
}

/// A minimum spanning tree in canonical undirected form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanningTree {
    edges: Vec<Edge>,
    total_weight: Weight,
    rounds: usize,
}

impl SpanningTree {
    /// Returns the tree edges sorted by `(weight, source, target)`.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the sum of the tree edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub const fn total_weight(&self) -> Weight { self.total_weight }

    /// Returns the number of Borůvka rounds that were needed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rounds(&self) -> usize { self.rounds }
}

/// Computes a minimum spanning tree of `graph`.
///
/// Directed graphs are read as undirected. A single-node graph yields an
/// empty tree. Callers are expected to pass a connected graph; otherwise the
/// construction stops with [`SpanningTreeError::DisconnectedInput`].
///
/// # Errors
/// Returns [`SpanningTreeError::EmptyGraph`] for a graph without nodes and
/// [`SpanningTreeError::DisconnectedInput`] when no spanning tree exists.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, Orientation, minimum_spanning_tree};
///
/// let graph = Graph::from_edges(
///     Orientation::Undirected,
///     [Edge::new(0, 1, 1), Edge::new(1, 2, 2), Edge::new(0, 2, 3)],
/// )?;
/// let tree = minimum_spanning_tree(&graph)?;
/// assert_eq!(tree.edges(), &[Edge::new(0, 1, 1), Edge::new(1, 2, 2)]);
/// assert_eq!(tree.total_weight(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.minimum_spanning_tree",
    err,
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn minimum_spanning_tree(graph: &Graph) -> Result<SpanningTree, SpanningTreeError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(SpanningTreeError::EmptyGraph);
    }

    let undirected;
    let edges = match graph.orientation() {
        Orientation::Undirected => graph.edges(),
        Orientation::Directed => {
            undirected = graph.clone().into_undirected();
            undirected.edges()
        }
    };

    let target = node_count - 1;
    let mut fragments = DisjointSet::new(node_count);
    let mut tree: Vec<Edge> = Vec::with_capacity(target);
    let mut rounds = 0_usize;

    while tree.len() < target {
        rounds += 1;
        let before = tree.len();
        for index in cheapest_safe_edges(edges, &mut fragments, node_count) {
            let edge = edges[index];
            // An earlier pick this round may already have joined both ends.
            if fragments.union(edge.source(), edge.target()) {
                tree.push(edge);
            }
        }
        if tree.len() == before {
            return Err(SpanningTreeError::DisconnectedInput {
                node_count,
                tree_edges: tree.len(),
                components: fragments.components(),
            });
        }
        debug!(
            round = rounds,
            added = tree.len() - before,
            components = fragments.components(),
            "boruvka round complete"
        );
    }

    tree.sort_unstable();
    let total_weight = tree
        .iter()
        .fold(0, |acc: Weight, edge| acc.saturating_add(edge.weight()));
    Ok(SpanningTree {
        edges: tree,
        total_weight,
        rounds,
    })
}

/// Returns the indices of the cheapest edge leaving each fragment, deduplicated
/// and in edge order.
fn cheapest_safe_edges(
    edges: &[Edge],
    fragments: &mut DisjointSet,
    node_count: usize,
) -> Vec<usize> {
    let mut cheapest: Vec<Option<usize>> = vec![None; node_count];
    for (index, edge) in edges.iter().enumerate() {
        let left = fragments.find(edge.source());
        let right = fragments.find(edge.target());
        if left == right {
            continue;
        }
        for root in [left, right] {
            let slot = &mut cheapest[root];
            if slot.is_none_or(|best| edge.weight() < edges[best].weight()) {
                *slot = Some(index);
            }
        }
    }

    let mut selected: Vec<usize> = cheapest.into_iter().flatten().collect();
    selected.sort_unstable();
    selected.dedup();
    selected
}

#[cfg(test)]
mod property;
