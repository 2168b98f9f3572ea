use graphsweep_core::{Edge, Graph, GraphSource, LoadError, Orientation, Weight};

/// Builds a graph from `(source, target, weight)` triples.
#[must_use]
pub fn graph(orientation: Orientation, raw: &[(usize, usize, Weight)]) -> Graph {
    Graph::from_edges(
        orientation,
        raw.iter()
            .map(|&(source, target, weight)| Edge::new(source, target, weight)),
    )
    .expect("fixture graph must be valid")
}

/// Source that replays raw rows, validating them on every load.
pub struct RowSource {
    name: &'static str,
    orientation: Orientation,
    rows: Vec<(usize, usize, Weight)>,
}

impl RowSource {
    #[must_use]
    pub fn new(name: &'static str, orientation: Orientation, rows: &[(usize, usize, Weight)]) -> Self {
        Self {
            name,
            orientation,
            rows: rows.to_vec(),
        }
    }
}

impl GraphSource for RowSource {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&self) -> Result<Graph, LoadError> {
        Graph::from_edges(
            self.orientation,
            self.rows
                .iter()
                .map(|&(source, target, weight)| Edge::new(source, target, weight)),
        )
        .map_err(|error| LoadError::InvalidGraph {
            input: self.name.to_owned(),
            error,
        })
    }
}
