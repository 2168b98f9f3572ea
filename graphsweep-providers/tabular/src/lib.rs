//! File-backed graph sources for edge-list and adjacency-matrix inputs.
//!
//! [`TabularGraphSource`] picks the [`GraphFormat`] and [`Delimiter`] from
//! the file extension and re-reads the file on every [`GraphSource::load`]
//! call. An unknown extension surfaces from `load`, not from construction.
//!
//! [`GraphSource::load`]: graphsweep_core::GraphSource::load

mod errors;
mod format;
mod parse;
mod source;
mod write;

pub use errors::TabularSourceError;
pub use format::{Delimiter, GraphFormat};
pub use parse::{
    MAX_NODE_ID, ParseOptions, parse_adjacency_matrix, parse_edge_list, read_graph,
    read_graph_with,
};
pub use source::TabularGraphSource;
pub use write::{write_adjacency_matrix, write_edge_list, write_graph};
