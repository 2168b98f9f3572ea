//! Graph source abstraction consumed by the experiment runner.

use std::{io, sync::Arc};

use thiserror::Error;

use crate::{
    error::define_error_codes,
    graph::{Graph, GraphError},
};

/// Errors produced while loading a graph from a [`GraphSource`].
///
/// Every variant carries the source identifier so a failing sweep point can
/// be reproduced.
#[non_exhaustive]
#[derive(Clone, Debug, Error)]
pub enum LoadError {
    /// The source's declared format is not one of the recognised kinds.
    #[error("input `{input}` has unsupported format `{format}`")]
    UnsupportedFormat {
        /// Source identifier.
        input: String,
        /// The unrecognised format or extension.
        format: String,
    },
    /// A row could not be parsed.
    #[error("input `{input}` line {line}: {reason}")]
    MalformedRow {
        /// Source identifier.
        input: String,
        /// One-based line number of the offending row.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The parsed rows did not form a valid graph.
    #[error("input `{input}` does not describe a valid graph: {error}")]
    InvalidGraph {
        /// Source identifier.
        input: String,
        /// Underlying graph validation failure.
        #[source]
        error: GraphError,
    },
    /// Reading the source failed.
    #[error("failed to read input `{input}`: {error}")]
    Io {
        /// Source identifier.
        input: String,
        /// Underlying operating system error.
        #[source]
        error: Arc<io::Error>,
    },
}

define_error_codes! {
    /// Stable codes describing [`LoadError`] variants.
    enum LoadErrorCode for LoadError {
        /// The source's declared format is not recognised.
        UnsupportedFormat => UnsupportedFormat { .. } => "LOAD_UNSUPPORTED_FORMAT",
        /// A row could not be parsed.
        MalformedRow => MalformedRow { .. } => "LOAD_MALFORMED_ROW",
        /// The parsed rows did not form a valid graph.
        InvalidGraph => InvalidGraph { .. } => "LOAD_INVALID_GRAPH",
        /// Reading the source failed.
        Io => Io { .. } => "LOAD_IO",
    }
}

/// Something that can produce a fresh [`Graph`] on demand.
///
/// The experiment runner calls [`GraphSource::load`] once per sweep point,
/// so implementations must be repeatable: loading twice yields identical
/// edge sets in identical order.
///
/// # Examples
/// ```
/// use graphsweep_core::{Edge, Graph, GraphSource, LoadError, Orientation};
///
/// struct Triangle;
///
/// impl GraphSource for Triangle {
///     fn name(&self) -> &str { "triangle" }
///     fn load(&self) -> Result<Graph, LoadError> {
///         Graph::from_edges(
///             Orientation::Undirected,
///             [Edge::new(0, 1, 1), Edge::new(1, 2, 2), Edge::new(0, 2, 3)],
///         )
///         .map_err(|error| LoadError::InvalidGraph { input: self.name().into(), error })
///     }
/// }
///
/// assert_eq!(Triangle.load()?.edge_count(), 3);
/// # Ok::<(), LoadError>(())
/// ```
pub trait GraphSource {
    /// Returns the identifier reported in results and errors.
    fn name(&self) -> &str;

    /// Loads the graph.
    ///
    /// # Errors
    /// Returns a [`LoadError`] describing why the graph could not be produced.
    fn load(&self) -> Result<Graph, LoadError>;
}

/// In-memory [`GraphSource`] that hands out clones of a prepared graph.
#[derive(Clone, Debug)]
pub struct StaticGraphSource {
    name: String,
    graph: Graph,
}

impl StaticGraphSource {
    /// Wraps `graph` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, graph: Graph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }
}

impl GraphSource for StaticGraphSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Graph, LoadError> {
        Ok(self.graph.clone())
    }
}
