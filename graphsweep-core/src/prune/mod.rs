//! Connectivity-preserving edge pruning.
//!
//! Pruning simulates graph degradation: the lowest-weight edges are removed
//! first, up to a requested share of the edge set, without ever returning a
//! graph that fails [`is_connected`]. Candidate removal counts are tried from
//! the requested count downwards and the first (largest) count that keeps
//! the graph connected wins.

use std::fmt;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    connectivity::is_connected,
    error::define_error_codes,
    graph::{Graph, Orientation},
};

/// Share of edges to remove, in whole percent (`0..=100`).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RemovalPercent(u8);

impl RemovalPercent {
    /// No pruning at all.
    pub const ZERO: Self = Self(0);

    /// Validates a percentage.
    ///
    /// # Errors
    /// Returns [`PruneError::InvalidPercent`] when `percent > 100`.
    ///
    /// # Examples
    /// ```
    /// use graphsweep_core::RemovalPercent;
    ///
    /// assert_eq!(RemovalPercent::new(25)?.get(), 25);
    /// assert!(RemovalPercent::new(101).is_err());
    /// # Ok::<(), graphsweep_core::PruneError>(())
    /// ```
    pub const fn new(percent: u8) -> Result<Self, PruneError> {
        if percent > 100 {
            return Err(PruneError::InvalidPercent { got: percent });
        }
        Ok(Self(percent))
    }

    /// Returns the raw percentage.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u8 { self.0 }
}

impl fmt::Display for RemovalPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Number of edges a given percentage asks to remove: `floor(p * |E| / 100)`.
///
/// # Examples
/// ```
/// use graphsweep_core::{RemovalPercent, removal_target};
///
/// assert_eq!(removal_target(RemovalPercent::new(50)?, 7), 3);
/// assert_eq!(removal_target(RemovalPercent::new(100)?, 7), 7);
/// # Ok::<(), graphsweep_core::PruneError>(())
/// ```
#[must_use]
pub const fn removal_target(percent: RemovalPercent, edge_count: usize) -> usize {
    edge_count.saturating_mul(percent.0 as usize) / 100
}

/// Errors raised by [`prune`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PruneError {
    /// The removal percentage exceeded 100.
    #[error("removal percentage must be within 0..=100 (got {got})")]
    InvalidPercent {
        /// The rejected percentage.
        got: u8,
    },
    /// No removal count, including zero, kept the graph connected.
    #[error(
        "no removal of up to {requested} edges keeps the {orientation} graph connected \
         ({node_count} nodes, {edge_count} edges)"
    )]
    Unsatisfiable {
        /// Orientation whose connectivity definition was applied.
        orientation: Orientation,
        /// Removal count derived from the percentage.
        requested: usize,
        /// Nodes in the input graph.
        node_count: usize,
        /// Edges in the input graph.
        edge_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PruneError`] variants.
    enum PruneErrorCode for PruneError {
        /// The removal percentage exceeded 100.
        InvalidPercent => InvalidPercent { .. } => "PRUNE_INVALID_PERCENT",
        /// No removal count kept the graph connected.
        UnsatisfiablePruning => Unsatisfiable { .. } => "PRUNE_UNSATISFIABLE",
    }
}

impl PruneError {
    /// Returns `true` when a sweep may skip this point instead of reporting a
    /// failure: unsatisfiable pruning of an undirected graph.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::Unsatisfiable {
                orientation: Orientation::Undirected,
                ..
            }
        )
    }
}

/// Result of a successful [`prune`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrunedGraph {
    graph: Graph,
    requested: usize,
    removed: usize,
}

impl PrunedGraph {
    /// Returns the pruned graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Consumes the outcome, returning the pruned graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Returns the removal count derived from the percentage.
    #[must_use]
    #[rustfmt::skip]
    pub const fn requested(&self) -> usize { self.requested }

    /// Returns the number of edges actually removed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn removed(&self) -> usize { self.removed }
}

/// Removes up to `percent` of the lightest edges while keeping `graph`
/// connected.
///
/// Edges are ranked by weight with a stable sort, so equal weights are
/// removed in original edge order. The surviving edges keep their original
/// order. A percentage of zero returns the graph unchanged without any
/// connectivity check.
///
/// # Errors
/// Returns [`PruneError::Unsatisfiable`] when even removing nothing leaves
/// the graph disconnected.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, Orientation, RemovalPercent, prune};
///
/// let graph = Graph::from_edges(
///     Orientation::Undirected,
///     [Edge::new(0, 1, 5), Edge::new(1, 2, 6), Edge::new(0, 2, 1)],
/// )?;
/// let pruned = prune(&graph, RemovalPercent::new(40)?)?;
/// assert_eq!(pruned.removed(), 1);
/// assert_eq!(pruned.graph().weight_between(0, 2), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.prune",
    err,
    skip(graph),
    fields(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        percent = percent.get(),
    ),
)]
pub fn prune(graph: &Graph, percent: RemovalPercent) -> Result<PrunedGraph, PruneError> {
    if percent == RemovalPercent::ZERO {
        return Ok(PrunedGraph {
            graph: graph.clone(),
            requested: 0,
            removed: 0,
        });
    }

    let requested = removal_target(percent, graph.edge_count());
    let ranking = rank_by_weight(graph);

    for removed in (0..=requested).rev() {
        let candidate = without_lightest(graph, &ranking, removed);
        if is_connected(&candidate) {
            debug!(requested, removed, "pruning preserved connectivity");
            return Ok(PrunedGraph {
                graph: candidate,
                requested,
                removed,
            });
        }
    }

    Err(PruneError::Unsatisfiable {
        orientation: graph.orientation(),
        requested,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
    })
}

/// Edge indices ordered by ascending weight; ties keep original order.
fn rank_by_weight(graph: &Graph) -> Vec<usize> {
    let edges = graph.edges();
    let mut ranking: Vec<usize> = (0..edges.len()).collect();
    ranking.sort_by_key(|&index| edges[index].weight());
    ranking
}

fn without_lightest(graph: &Graph, ranking: &[usize], count: usize) -> Graph {
    let mut dropped = vec![false; graph.edge_count()];
    for &index in ranking.iter().take(count) {
        dropped[index] = true;
    }
    let kept = graph
        .edges()
        .iter()
        .zip(dropped)
        .filter_map(|(edge, drop)| (!drop).then_some(*edge))
        .collect();
    graph.derive(graph.node_count(), kept)
}
