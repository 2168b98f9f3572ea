//! Row parsing for both tabular layouts.
//!
//! Comma-delimited input goes through the `csv` crate. Loose input splits
//! fields on commas, semicolons or whitespace. In both modes blank lines and
//! lines starting with `#` are ignored but still counted, so reported line
//! numbers match the file.

use std::io::BufRead;

use graphsweep_core::{Edge, Graph, Orientation, Weight};
use tracing::debug;

use crate::{
    errors::TabularSourceError,
    format::{Delimiter, GraphFormat},
};

/// Largest edge-list node id accepted by default.
///
/// Node ids are dense, so an id of `k` allocates `k + 1` adjacency slots.
pub const MAX_NODE_ID: usize = 1 << 20;

/// Settings shared by the parsers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    delimiter: Delimiter,
    max_node_id: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            max_node_id: MAX_NODE_ID,
        }
    }
}

impl ParseOptions {
    /// Sets how fields are separated.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the largest node id an edge-list row may name.
    #[must_use]
    pub const fn with_max_node_id(mut self, max_node_id: usize) -> Self {
        self.max_node_id = max_node_id;
        self
    }

    /// Returns the field delimiter.
    #[must_use]
    #[rustfmt::skip]
    pub const fn delimiter(&self) -> Delimiter { self.delimiter }

    /// Returns the largest accepted node id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_node_id(&self) -> usize { self.max_node_id }
}

struct Row {
    line: usize,
    fields: Vec<String>,
}

impl Row {
    /// A header row has no numeric field at all.
    fn is_header(&self) -> bool {
        self.fields.iter().all(|field| field.parse::<i64>().is_err())
    }
}

fn significant_rows(
    reader: impl BufRead,
    delimiter: Delimiter,
) -> Result<Vec<Row>, TabularSourceError> {
    match delimiter {
        Delimiter::Comma => csv_rows(reader),
        Delimiter::Loose => loose_rows(reader),
    }
}

fn csv_rows(reader: impl BufRead) -> Result<Vec<Row>, TabularSourceError> {
    let mut records = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in records.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |position| line_number(position.line()));
        rows.push(Row {
            line,
            fields: record.iter().map(str::to_owned).collect(),
        });
    }
    Ok(rows)
}

fn loose_rows(reader: impl BufRead) -> Result<Vec<Row>, TabularSourceError> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields = trimmed
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();
        rows.push(Row {
            line: index + 1,
            fields,
        });
    }
    Ok(rows)
}

fn line_number(line: u64) -> usize {
    usize::try_from(line).unwrap_or(usize::MAX)
}

fn csv_error(error: csv::Error) -> TabularSourceError {
    let line = error
        .position()
        .map_or(0, |position| line_number(position.line()));
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => TabularSourceError::Io(source),
        _ => TabularSourceError::malformed(line, reason),
    }
}

fn parse_node(raw: &str, line: usize, max_node_id: usize) -> Result<usize, TabularSourceError> {
    let node: usize = raw
        .parse()
        .map_err(|_| TabularSourceError::malformed(line, format!("invalid node id `{raw}`")))?;
    if node > max_node_id {
        return Err(TabularSourceError::malformed(
            line,
            format!("node id {node} exceeds the limit of {max_node_id}"),
        ));
    }
    Ok(node)
}

fn parse_weight(raw: &str, line: usize) -> Result<Weight, TabularSourceError> {
    if let Ok(weight) = raw.parse::<Weight>() {
        return Ok(weight);
    }
    Err(match raw.parse::<i64>() {
        Ok(negative) => TabularSourceError::malformed(line, format!("negative weight {negative}")),
        Err(_) => TabularSourceError::malformed(line, format!("invalid weight `{raw}`")),
    })
}

/// Parses `source,target,weight` rows with the default [`ParseOptions`].
///
/// The first row may be a header made only of non-numeric fields. The node
/// count is one more than the largest endpoint.
///
/// # Errors
/// Returns [`TabularSourceError::MalformedRow`] for rows without exactly
/// three fields, with unparsable or negative values, or with a node id above
/// [`MAX_NODE_ID`], and [`TabularSourceError::InvalidGraph`] for self-loops
/// and zero weights.
///
/// # Examples
/// ```
/// use graphsweep_core::Orientation;
/// use graphsweep_providers_tabular::parse_edge_list;
///
/// let graph = parse_edge_list("source,target,weight\n0,1,4\n1 2 1\n".as_bytes(), Orientation::Directed)?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), graphsweep_providers_tabular::TabularSourceError>(())
/// ```
pub fn parse_edge_list(
    reader: impl BufRead,
    orientation: Orientation,
) -> Result<Graph, TabularSourceError> {
    edge_list(reader, orientation, ParseOptions::default())
}

fn edge_list(
    reader: impl BufRead,
    orientation: Orientation,
    options: ParseOptions,
) -> Result<Graph, TabularSourceError> {
    let rows = significant_rows(reader, options.delimiter)?;
    let mut edges = Vec::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        if position == 0 && row.is_header() {
            continue;
        }
        let [source, target, weight] = row.fields.as_slice() else {
            return Err(TabularSourceError::malformed(
                row.line,
                format!("expected 3 fields, found {}", row.fields.len()),
            ));
        };
        edges.push(Edge::new(
            parse_node(source, row.line, options.max_node_id)?,
            parse_node(target, row.line, options.max_node_id)?,
            parse_weight(weight, row.line)?,
        ));
    }
    debug!(rows = rows.len(), edges = edges.len(), "parsed edge list");
    Ok(Graph::from_edges(orientation, edges)?)
}

/// Parses a square matrix whose non-zero cell `[i][j]` is an edge `i -> j`.
///
/// The node count is the number of rows. For undirected graphs the first
/// cell seen for each unordered pair wins.
///
/// # Errors
/// Returns [`TabularSourceError::MalformedRow`] for rows of the wrong width,
/// unparsable or negative cells, and non-zero diagonal cells.
pub fn parse_adjacency_matrix(
    reader: impl BufRead,
    orientation: Orientation,
) -> Result<Graph, TabularSourceError> {
    adjacency_matrix(reader, orientation, ParseOptions::default())
}

fn adjacency_matrix(
    reader: impl BufRead,
    orientation: Orientation,
    options: ParseOptions,
) -> Result<Graph, TabularSourceError> {
    let rows = significant_rows(reader, options.delimiter)?;
    let node_count = rows.len();
    let mut edges = Vec::new();
    for (from, row) in rows.iter().enumerate() {
        if row.fields.len() != node_count {
            return Err(TabularSourceError::malformed(
                row.line,
                format!("expected {node_count} fields, found {}", row.fields.len()),
            ));
        }
        for (to, cell) in row.fields.iter().enumerate() {
            let weight = parse_weight(cell, row.line)?;
            if weight == 0 {
                continue;
            }
            if from == to {
                return Err(TabularSourceError::malformed(
                    row.line,
                    format!("diagonal cell must be 0, found {weight}"),
                ));
            }
            edges.push(Edge::new(from, to, weight));
        }
    }
    debug!(nodes = node_count, edges = edges.len(), "parsed adjacency matrix");
    Ok(Graph::with_node_count(orientation, node_count, edges)?)
}

/// Parses `reader` in the given format with the default [`ParseOptions`].
///
/// # Errors
/// See [`parse_edge_list`] and [`parse_adjacency_matrix`].
///
/// # Examples
/// ```
/// use graphsweep_core::Orientation;
/// use graphsweep_providers_tabular::{GraphFormat, read_graph};
///
/// let graph = read_graph("0 3\n3 0\n".as_bytes(), GraphFormat::AdjacencyMatrix, Orientation::Undirected)?;
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), graphsweep_providers_tabular::TabularSourceError>(())
/// ```
pub fn read_graph(
    reader: impl BufRead,
    format: GraphFormat,
    orientation: Orientation,
) -> Result<Graph, TabularSourceError> {
    read_graph_with(reader, format, orientation, ParseOptions::default())
}

/// Parses `reader` in the given format with explicit `options`.
///
/// # Errors
/// See [`parse_edge_list`] and [`parse_adjacency_matrix`].
///
/// # Examples
/// ```
/// use graphsweep_core::Orientation;
/// use graphsweep_providers_tabular::{Delimiter, GraphFormat, ParseOptions, read_graph_with};
///
/// let options = ParseOptions::default().with_delimiter(Delimiter::Comma);
/// let raw = "\"source\",\"target\",\"weight\"\n\"0\",\"1\",\"4\"\n";
/// let graph = read_graph_with(raw.as_bytes(), GraphFormat::EdgeList, Orientation::Directed, options)?;
/// assert_eq!(graph.total_weight(), 4);
/// # Ok::<(), graphsweep_providers_tabular::TabularSourceError>(())
/// ```
pub fn read_graph_with(
    reader: impl BufRead,
    format: GraphFormat,
    orientation: Orientation,
    options: ParseOptions,
) -> Result<Graph, TabularSourceError> {
    match format {
        GraphFormat::EdgeList => edge_list(reader, orientation, options),
        GraphFormat::AdjacencyMatrix => adjacency_matrix(reader, orientation, options),
    }
}
