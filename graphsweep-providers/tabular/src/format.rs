use std::{fmt, path::Path, str::FromStr};

use crate::errors::TabularSourceError;

/// On-disk layout of a graph file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphFormat {
    /// One `source,target,weight` row per edge.
    EdgeList,
    /// One row per node; cell `[i][j]` is the weight of `i -> j`, zero for
    /// no edge.
    AdjacencyMatrix,
}

impl GraphFormat {
    /// Maps a file extension (case-insensitive) to a format.
    ///
    /// # Examples
    /// ```
    /// use graphsweep_providers_tabular::GraphFormat;
    ///
    /// assert_eq!(GraphFormat::from_extension("CSV"), Some(GraphFormat::EdgeList));
    /// assert_eq!(GraphFormat::from_extension("adj"), Some(GraphFormat::AdjacencyMatrix));
    /// assert_eq!(GraphFormat::from_extension("xlsx"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" | "txt" | "edges" => Some(Self::EdgeList),
            "matrix" | "adj" => Some(Self::AdjacencyMatrix),
            _ => None,
        }
    }

    /// Detects the format of `path` from its extension.
    ///
    /// # Errors
    /// Returns [`TabularSourceError::UnsupportedFormat`] for a missing or
    /// unknown extension.
    pub fn from_path(path: &Path) -> Result<Self, TabularSourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| TabularSourceError::UnsupportedFormat {
            path: path.display().to_string(),
            extension: extension.to_owned(),
        })
    }

    /// Returns the canonical format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EdgeList => "edge-list",
            Self::AdjacencyMatrix => "adjacency-matrix",
        }
    }
}

/// How fields within a row are separated.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Delimiter {
    /// RFC 4180 comma-separated values, read with the `csv` crate.
    Comma,
    /// Fields split on commas, semicolons or runs of whitespace.
    #[default]
    Loose,
}

impl Delimiter {
    /// Picks [`Delimiter::Comma`] for `.csv` files and
    /// [`Delimiter::Loose`] for everything else.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use graphsweep_providers_tabular::Delimiter;
    ///
    /// assert_eq!(Delimiter::from_path(Path::new("roads.CSV")), Delimiter::Comma);
    /// assert_eq!(Delimiter::from_path(Path::new("grid.matrix")), Delimiter::Loose);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Comma,
            _ => Self::Loose,
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphFormat {
    type Err = TabularSourceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "edge-list" | "edge_list" | "edges" => Ok(Self::EdgeList),
            "adjacency-matrix" | "adjacency_matrix" | "matrix" => Ok(Self::AdjacencyMatrix),
            _ => Err(TabularSourceError::UnknownFormatName {
                name: raw.to_owned(),
            }),
        }
    }
}
