//! Serialisation of graphs into the formats the parser reads.
//!
//! Both layouts are written as comma-separated records, which the `.csv`
//! reader and the loose reader accept alike.

use std::io::{self, Write};

use graphsweep_core::{Graph, Orientation};

use crate::format::GraphFormat;

/// Writes a `source,target,weight` header followed by one row per edge.
///
/// # Errors
/// Propagates write failures.
pub fn write_edge_list(graph: &Graph, writer: impl Write) -> io::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["source", "target", "weight"])?;
    for edge in graph.edges() {
        out.serialize((edge.source(), edge.target(), edge.weight()))?;
    }
    out.flush()
}

/// Writes an `n x n` matrix; undirected edges fill both cells.
///
/// # Errors
/// Propagates write failures.
pub fn write_adjacency_matrix(graph: &Graph, writer: impl Write) -> io::Result<()> {
    let n = graph.node_count();
    let mut cells = vec![0; n * n];
    for edge in graph.edges() {
        cells[edge.source() * n + edge.target()] = edge.weight();
        if graph.orientation() == Orientation::Undirected {
            cells[edge.target() * n + edge.source()] = edge.weight();
        }
    }
    let mut out = csv::Writer::from_writer(writer);
    for row in cells.chunks(n.max(1)).take(n) {
        out.write_record(row.iter().map(u64::to_string))?;
    }
    out.flush()
}

/// Writes `graph` in `format`.
///
/// # Errors
/// Propagates write failures.
pub fn write_graph(graph: &Graph, format: GraphFormat, writer: impl Write) -> io::Result<()> {
    match format {
        GraphFormat::EdgeList => write_edge_list(graph, writer),
        GraphFormat::AdjacencyMatrix => write_adjacency_matrix(graph, writer),
    }
}
