//! Shared test utilities for `graphsweep-core`.

use std::cell::Cell;

use graphsweep_test_support::proptest_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Edge, Graph, Orientation, Weight};
use crate::source::{GraphSource, LoadError};

/// Builds a standard proptest configuration from the shared run profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph over `node_count` nodes from `(source, target, weight)`
/// triples, panicking on invalid fixtures.
pub(crate) fn graph_from(
    orientation: Orientation,
    node_count: usize,
    raw: &[(usize, usize, Weight)],
) -> Graph {
    Graph::with_node_count(
        orientation,
        node_count,
        raw.iter()
            .map(|&(source, target, weight)| Edge::new(source, target, weight)),
    )
    .expect("fixture graph must be valid")
}

/// Generates small connected graphs (strongly connected when directed).
///
/// Weights are drawn from a narrow range so ties are common.
pub(crate) fn connected_graph_strategy(orientation: Orientation) -> impl Strategy<Value = Graph> {
    (2_usize..=12, 0_usize..=24, any::<u64>()).prop_map(move |(node_count, extra, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        random_connected_graph(orientation, node_count, extra, &mut rng)
    })
}

/// Builds a connected graph: a random spanning tree (undirected) or a
/// Hamiltonian cycle over a shuffled order (directed), plus `extra` random
/// edges.
pub(crate) fn random_connected_graph(
    orientation: Orientation,
    node_count: usize,
    extra: usize,
    rng: &mut SmallRng,
) -> Graph {
    let mut order: Vec<usize> = (0..node_count).collect();
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }

    let mut edges = Vec::new();
    match orientation {
        Orientation::Undirected => {
            for position in 1..order.len() {
                let parent = order[rng.gen_range(0..position)];
                edges.push(Edge::new(parent, order[position], rng.gen_range(1..=8)));
            }
        }
        Orientation::Directed => {
            for position in 0..order.len() {
                let next = order[(position + 1) % order.len()];
                edges.push(Edge::new(order[position], next, rng.gen_range(1..=8)));
            }
        }
    }
    for _ in 0..extra {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if source != target {
            edges.push(Edge::new(source, target, rng.gen_range(1..=8)));
        }
    }

    Graph::with_node_count(orientation, node_count, edges).expect("generated graph is valid")
}

/// [`GraphSource`] returning a fixed graph and counting `load` calls.
pub(crate) struct CountingSource {
    name: &'static str,
    graph: Graph,
    loads: Cell<usize>,
}

impl CountingSource {
    pub(crate) fn new(name: &'static str, graph: Graph) -> Self {
        Self {
            name,
            graph,
            loads: Cell::new(0),
        }
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl GraphSource for CountingSource {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&self) -> Result<Graph, LoadError> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.graph.clone())
    }
}

/// [`GraphSource`] that always fails with a malformed-row error.
pub(crate) struct BrokenSource;

impl GraphSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn load(&self) -> Result<Graph, LoadError> {
        Err(LoadError::MalformedRow {
            input: "broken".into(),
            line: 3,
            reason: "expected 3 fields, found 2".into(),
        })
    }
}
