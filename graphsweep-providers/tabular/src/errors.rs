use std::io;

use graphsweep_core::{GraphError, LoadError};
use thiserror::Error;

/// Errors raised while reading tabular graph files.
#[derive(Debug, Error)]
pub enum TabularSourceError {
    /// The file extension does not map to a known format.
    #[error("unsupported extension `{extension}` for `{path}`")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
        /// Extension found, empty when missing.
        extension: String,
    },
    /// A format name did not match `edge-list` or `adjacency-matrix`.
    #[error("unknown graph format `{name}` (expected edge-list or adjacency-matrix)")]
    UnknownFormatName {
        /// The unrecognised name.
        name: String,
    },
    /// A row could not be parsed.
    #[error("line {line}: {reason}")]
    MalformedRow {
        /// One-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
    /// The rows parsed but do not form a valid graph.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl TabularSourceError {
    /// Attaches the input identifier and converts into the core load error.
    #[must_use]
    pub fn into_load_error(self, input: &str) -> LoadError {
        let input = input.to_owned();
        match self {
            Self::UnsupportedFormat { extension, .. } => LoadError::UnsupportedFormat {
                input,
                format: extension,
            },
            Self::UnknownFormatName { name } => LoadError::UnsupportedFormat {
                input,
                format: name,
            },
            Self::MalformedRow { line, reason } => LoadError::MalformedRow {
                input,
                line,
                reason,
            },
            Self::InvalidGraph(error) => LoadError::InvalidGraph { input, error },
            Self::Io(error) => LoadError::Io {
                input,
                error: error.into(),
            },
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
