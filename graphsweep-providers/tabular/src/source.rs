use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use graphsweep_core::{Graph, GraphSource, LoadError, Orientation};
use tracing::instrument;

use crate::{
    errors::TabularSourceError,
    format::{Delimiter, GraphFormat},
    parse::{ParseOptions, read_graph_with},
};

/// [`GraphSource`] backed by an edge-list or adjacency-matrix file.
///
/// `.csv` files are read as RFC 4180 comma-separated values; other
/// extensions use the loose comma, semicolon or whitespace split.
///
/// Node ids are dense: an edge-list row naming node `k` gives the graph
/// `k + 1` nodes. Ids beyond [`MAX_NODE_ID`](crate::MAX_NODE_ID), or the
/// limit set with [`TabularGraphSource::with_max_node_id`], are rejected as
/// malformed rows.
///
/// # Examples
/// ```
/// use graphsweep_core::{GraphSource, Orientation};
/// use graphsweep_providers_tabular::{GraphFormat, TabularGraphSource};
///
/// let source = TabularGraphSource::new("inputs/roads.csv", Orientation::Undirected);
/// assert_eq!(source.format(), Some(GraphFormat::EdgeList));
/// assert_eq!(source.name(), "inputs/roads.csv");
///
/// let unknown = TabularGraphSource::new("inputs/roads.parquet", Orientation::Undirected);
/// assert_eq!(unknown.format(), None);
/// assert_eq!(unknown.load().map_err(|err| err.code().as_str()), Err("LOAD_UNSUPPORTED_FORMAT"));
/// ```
#[derive(Clone, Debug)]
pub struct TabularGraphSource {
    path: PathBuf,
    name: String,
    format: Option<GraphFormat>,
    orientation: Orientation,
    options: ParseOptions,
}

impl TabularGraphSource {
    /// Creates a source for `path`, detecting the format from its extension.
    ///
    /// A missing or unknown extension is not an error here; every
    /// [`GraphSource::load`] then fails with
    /// [`LoadError::UnsupportedFormat`], so a sweep reports the input as
    /// failed and moves on.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, orientation: Orientation) -> Self {
        let path = path.into();
        let format = GraphFormat::from_path(&path).ok();
        Self::build(path, format, orientation)
    }

    /// Creates a source for `path` with an explicit format.
    #[must_use]
    pub fn with_format(path: impl Into<PathBuf>, format: GraphFormat, orientation: Orientation) -> Self {
        Self::build(path.into(), Some(format), orientation)
    }

    fn build(path: PathBuf, format: Option<GraphFormat>, orientation: Orientation) -> Self {
        let options = ParseOptions::default().with_delimiter(Delimiter::from_path(&path));
        Self {
            name: path.display().to_string(),
            path,
            format,
            orientation,
            options,
        }
    }

    /// Replaces the largest node id an edge-list row may name.
    #[must_use]
    pub const fn with_max_node_id(mut self, max_node_id: usize) -> Self {
        self.options = self.options.with_max_node_id(max_node_id);
        self
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file format, or `None` when the extension is not
    /// recognised.
    #[must_use]
    #[rustfmt::skip]
    pub const fn format(&self) -> Option<GraphFormat> { self.format }

    /// Returns the orientation assigned to loaded graphs.
    #[must_use]
    #[rustfmt::skip]
    pub const fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the parser settings derived from the path.
    #[must_use]
    #[rustfmt::skip]
    pub const fn options(&self) -> ParseOptions { self.options }

    /// Reads and parses the file.
    ///
    /// # Errors
    /// Returns [`TabularSourceError::UnsupportedFormat`] when no format was
    /// resolved, [`TabularSourceError::Io`] when the file cannot be read, and
    /// the parse errors described by [`read_graph_with`].
    pub fn read(&self) -> Result<Graph, TabularSourceError> {
        let format = match self.format {
            Some(format) => format,
            None => GraphFormat::from_path(&self.path)?,
        };
        let file = File::open(&self.path)?;
        read_graph_with(BufReader::new(file), format, self.orientation, self.options)
    }
}

impl GraphSource for TabularGraphSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "providers.tabular.load",
        err,
        skip(self),
        fields(
            input = %self.name,
            format = self.format.map(GraphFormat::as_str),
            orientation = %self.orientation,
        ),
    )]
    fn load(&self) -> Result<Graph, LoadError> {
        self.read().map_err(|error| error.into_load_error(&self.name))
    }
}
