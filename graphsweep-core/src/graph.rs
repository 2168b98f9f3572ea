//! Canonical weighted graph model shared by the pruner and both engines.
//!
//! A [`Graph`] owns a dense node range `0..node_count` and a list of unique
//! weighted edges. Undirected graphs store every edge once in canonical
//! `(min, max)` form; directed graphs keep `(u, v)` and `(v, u)` distinct.
//! Edge order is preserved from construction so that every downstream
//! tie-break ("first encountered wins") is deterministic.

use std::{cmp::Ordering, collections::HashSet, fmt};

use thiserror::Error;

use crate::error::define_error_codes;

/// Positive integer edge weight.
pub type Weight = u64;

/// Whether edges are read as ordered or unordered node pairs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Orientation {
    /// `(u, v)` and `(v, u)` are distinct edges.
    Directed,
    /// `(u, v)` and `(v, u)` name the same edge.
    Undirected,
}

impl Orientation {
    /// Returns a lowercase label suitable for logs and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weighted edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: Weight,
}

impl Edge {
    /// Creates an edge. Validation happens when the edge joins a [`Graph`].
    ///
    /// # Examples
    /// ```
    /// use graphsweep_core::Edge;
    ///
    /// let edge = Edge::new(0, 1, 4);
    /// assert_eq!((edge.source(), edge.target(), edge.weight()), (0, 1, 4));
    /// ```
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the tail of the edge (the smaller endpoint for undirected graphs).
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the head of the edge (the larger endpoint for undirected graphs).
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> Weight { self.weight }

    /// Returns the endpoint opposite `node`, or `None` when `node` is not an
    /// endpoint of this edge.
    #[must_use]
    pub const fn opposite(&self, node: usize) -> Option<usize> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }

    const fn canonical(self) -> Self {
        if self.source <= self.target {
            self
        } else {
            Self {
                source: self.target,
                target: self.source,
                weight: self.weight,
            }
        }
    }

    const fn key(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.target, self.weight)
    }
}

/// Errors raised while constructing a [`Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge connected a node to itself.
    #[error("self-loop on node {node} is not allowed")]
    SelfLoop {
        /// The node referenced by both endpoints.
        node: usize,
    },
    /// An edge carried a zero weight.
    #[error("edge ({left}, {right}) must have a positive weight")]
    NonPositiveWeight {
        /// First endpoint as supplied.
        left: usize,
        /// Second endpoint as supplied.
        right: usize,
    },
    /// An edge referenced a node outside the declared node range.
    #[error("edge references node {node}, but node_count is {node_count}")]
    NodeOutOfRange {
        /// Offending node id.
        node: usize,
        /// Declared number of nodes.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge connected a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge carried a zero weight.
        NonPositiveWeight => NonPositiveWeight { .. } => "GRAPH_NON_POSITIVE_WEIGHT",
        /// An edge referenced a node outside the declared node range.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
    }
}

/// Weighted graph over the dense node range `0..node_count`.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, Orientation};
///
/// let graph = Graph::from_edges(
///     Orientation::Undirected,
///     [Edge::new(0, 1, 1), Edge::new(1, 0, 7), Edge::new(1, 2, 2)],
/// )?;
/// assert_eq!(graph.node_count(), 3);
/// // (1, 0) is the same undirected edge as (0, 1); the first one wins.
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.weight_between(1, 0), Some(1));
/// # Ok::<(), graphsweep_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    orientation: Orientation,
    node_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph whose node count is one past the largest endpoint.
    ///
    /// Node ids are dense: adjacency views allocate one slot per id up to
    /// the largest endpoint, so callers reading untrusted ids should bound
    /// them first. Duplicate `(u, v)` keys keep their first occurrence.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] or [`GraphError::NonPositiveWeight`]
    /// for invalid edges.
    pub fn from_edges(
        orientation: Orientation,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self, GraphError> {
        let edges: Vec<Edge> = edges.into_iter().collect();
        let node_count = edges
            .iter()
            .map(|edge| edge.source.max(edge.target))
            .max()
            .map_or(0, |max| max.saturating_add(1));
        Self::with_node_count(orientation, node_count, edges)
    }

    /// Builds a graph over an explicit node range.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when an endpoint is not below
    /// `node_count`, plus the validation errors of [`Graph::from_edges`].
    pub fn with_node_count(
        orientation: Orientation,
        node_count: usize,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();
        for edge in edges {
            validate_edge(&edge, node_count)?;
            let edge = match orientation {
                Orientation::Directed => edge,
                Orientation::Undirected => edge.canonical(),
            };
            if seen.insert(edge.key()) {
                accepted.push(edge);
            }
        }
        Ok(Self {
            orientation,
            node_count,
            edges: accepted,
        })
    }

    /// Returns the edge orientation of this graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of unique edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges in construction order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Sums every edge weight, saturating on overflow.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.edges
            .iter()
            .fold(0, |acc: Weight, edge| acc.saturating_add(edge.weight))
    }

    /// Looks up the weight of the edge joining `left` to `right`.
    ///
    /// Undirected graphs ignore endpoint order.
    #[must_use]
    pub fn weight_between(&self, left: usize, right: usize) -> Option<Weight> {
        let key = match self.orientation {
            Orientation::Directed => (left, right),
            Orientation::Undirected => Edge::new(left, right, 0).canonical().key(),
        };
        self.edges
            .iter()
            .find(|edge| edge.key() == key)
            .map(Edge::weight)
    }

    /// Returns the subgraph induced by nodes `0..limit`.
    ///
    /// A limit at or above the node count yields an unchanged copy.
    #[must_use]
    pub fn restrict_to(&self, limit: usize) -> Self {
        if limit >= self.node_count {
            return self.clone();
        }
        self.derive(
            limit,
            self.edges
                .iter()
                .filter(|edge| edge.source < limit && edge.target < limit)
                .copied()
                .collect(),
        )
    }

    /// Reinterprets the graph as undirected, keeping the first occurrence of
    /// each unordered pair.
    #[must_use]
    pub fn into_undirected(self) -> Self {
        if self.orientation == Orientation::Undirected {
            return self;
        }
        let mut seen = HashSet::new();
        let edges = self
            .edges
            .into_iter()
            .map(Edge::canonical)
            .filter(|edge| seen.insert(edge.key()))
            .collect();
        Self {
            orientation: Orientation::Undirected,
            node_count: self.node_count,
            edges,
        }
    }

    /// Builds outgoing adjacency lists in edge order.
    ///
    /// Undirected edges appear in the lists of both endpoints.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(usize, Weight)>> {
        self.collect_adjacency(false)
    }

    /// Builds incoming adjacency lists in edge order.
    ///
    /// Identical to [`Graph::adjacency`] for undirected graphs.
    #[must_use]
    pub fn reverse_adjacency(&self) -> Vec<Vec<(usize, Weight)>> {
        self.collect_adjacency(true)
    }

    /// Creates a sibling graph sharing orientation and node range.
    ///
    /// Callers guarantee `edges` is a subset of already validated edges.
    pub(crate) const fn derive(&self, node_count: usize, edges: Vec<Edge>) -> Self {
        Self {
            orientation: self.orientation,
            node_count,
            edges,
        }
    }

    fn collect_adjacency(&self, reversed: bool) -> Vec<Vec<(usize, Weight)>> {
        let mut lists = vec![Vec::new(); self.node_count];
        for edge in &self.edges {
            let (from, to) = if reversed {
                (edge.target, edge.source)
            } else {
                (edge.source, edge.target)
            };
            lists[from].push((to, edge.weight));
            if self.orientation == Orientation::Undirected {
                lists[to].push((from, edge.weight));
            }
        }
        lists
    }
}

fn validate_edge(edge: &Edge, node_count: usize) -> Result<(), GraphError> {
    for node in [edge.source, edge.target] {
        if node >= node_count {
            return Err(GraphError::NodeOutOfRange { node, node_count });
        }
    }
    if edge.source == edge.target {
        return Err(GraphError::SelfLoop { node: edge.source });
    }
    if edge.weight == 0 {
        return Err(GraphError::NonPositiveWeight {
            left: edge.source,
            right: edge.target,
        });
    }
    Ok(())
}
