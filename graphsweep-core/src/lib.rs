//! Graphsweep core library.
//!
//! Loads weighted graphs through a [`GraphSource`], prunes them under a
//! connectivity guarantee, and times repeated shortest-path and
//! minimum-spanning-tree computations across a parameter sweep.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;

mod connectivity;
mod experiment;
mod graph;
mod prune;
mod shortest_path;
mod source;
mod spanning_tree;
#[cfg(feature = "synthetic")]
#[cfg_attr(docsrs, doc(cfg(feature = "synthetic")))]
pub mod synthetic;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    connectivity::{is_connected, reachable_count},
    experiment::{
        Algorithm, Experiment, ExperimentBuilder, ExperimentError, ExperimentErrorCode,
        ExperimentInput, PointFailure, PointOutcome, ResultSink, SweepPoint, SweepPointError,
        SweepPointReport, SweepSummary, Trial, TrialPayload, TrialSet, WHOLE_GRAPH_STEP,
    },
    graph::{Edge, Graph, GraphError, GraphErrorCode, Orientation, Weight},
    prune::{PruneError, PruneErrorCode, PrunedGraph, RemovalPercent, prune, removal_target},
    shortest_path::{
        DistanceMap, PathMap, ShortestPathError, ShortestPathErrorCode, ShortestPaths,
        shortest_paths,
    },
    source::{GraphSource, LoadError, LoadErrorCode, StaticGraphSource},
    spanning_tree::{
        SpanningTree, SpanningTreeError, SpanningTreeErrorCode, minimum_spanning_tree,
    },
};
