//! Seeded random graph generation.
//!
//! Generated graphs are connected by construction: undirected graphs start
//! from a random spanning tree and directed graphs from a Hamiltonian cycle
//! over a shuffled node order, so they are strongly connected. Extra edges
//! are sampled uniformly afterwards; self-loops are discarded and repeated
//! pairs collapse to their first occurrence. The same configuration always
//! yields the same graph.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::{
    graph::{Edge, Graph, GraphError, Orientation, Weight},
    source::{GraphSource, LoadError},
};

/// Errors raised while generating a synthetic graph.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// The requested maximum weight was zero.
    #[error("maximum weight must be greater than zero")]
    ZeroMaxWeight,
    /// The generated edges were rejected by graph validation.
    #[error(transparent)]
    InvalidGraph(#[from] GraphError),
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of random edges sampled on top of the connecting backbone.
    pub extra_edges: usize,
    /// Largest edge weight; weights are drawn from `1..=max_weight`.
    pub max_weight: Weight,
    /// Edge orientation.
    pub orientation: Orientation,
    /// RNG seed.
    pub seed: u64,
}

impl SyntheticGraphConfig {
    /// Creates an undirected configuration with weights up to 100.
    #[must_use]
    pub const fn new(node_count: usize, extra_edges: usize, seed: u64) -> Self {
        Self {
            node_count,
            extra_edges,
            max_weight: 100,
            orientation: Orientation::Undirected,
            seed,
        }
    }

    /// Overrides the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Overrides the maximum weight.
    #[must_use]
    pub const fn with_max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }
}

/// Generates a connected graph from `config`.
///
/// # Errors
/// Returns [`SyntheticError::ZeroNodes`] or [`SyntheticError::ZeroMaxWeight`]
/// for degenerate configurations.
///
/// # Examples
/// ```
/// use graphsweep_core::{is_connected, synthetic::{SyntheticGraphConfig, generate}};
///
/// let graph = generate(&SyntheticGraphConfig::new(50, 100, 7))?;
/// assert_eq!(graph.node_count(), 50);
/// assert!(graph.edge_count() >= 49);
/// assert!(is_connected(&graph));
/// # Ok::<(), graphsweep_core::synthetic::SyntheticError>(())
/// ```
pub fn generate(config: &SyntheticGraphConfig) -> Result<Graph, SyntheticError> {
    validate(config)?;
    Ok(build(config)?)
}

fn validate(config: &SyntheticGraphConfig) -> Result<(), SyntheticError> {
    if config.node_count == 0 {
        return Err(SyntheticError::ZeroNodes);
    }
    if config.max_weight == 0 {
        return Err(SyntheticError::ZeroMaxWeight);
    }
    Ok(())
}

fn build(config: &SyntheticGraphConfig) -> Result<Graph, GraphError> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let n = config.node_count;
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }

    let mut edges = Vec::with_capacity(n + config.extra_edges);
    match config.orientation {
        Orientation::Undirected => {
            for position in 1..n {
                let parent = order[rng.gen_range(0..position)];
                let weight = rng.gen_range(1..=config.max_weight);
                edges.push(Edge::new(parent, order[position], weight));
            }
        }
        Orientation::Directed if n > 1 => {
            for position in 0..n {
                let next = order[(position + 1) % n];
                let weight = rng.gen_range(1..=config.max_weight);
                edges.push(Edge::new(order[position], next, weight));
            }
        }
        Orientation::Directed => {}
    }
    for _ in 0..config.extra_edges {
        let source = rng.gen_range(0..n);
        let target = rng.gen_range(0..n);
        let weight = rng.gen_range(1..=config.max_weight);
        if source != target {
            edges.push(Edge::new(source, target, weight));
        }
    }

    Graph::with_node_count(config.orientation, n, edges)
}

/// [`GraphSource`] that regenerates a synthetic graph on every load.
#[derive(Clone, Debug)]
pub struct SyntheticGraphSource {
    name: String,
    config: SyntheticGraphConfig,
}

impl SyntheticGraphSource {
    /// Creates a source named `name`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::ZeroNodes`] or
    /// [`SyntheticError::ZeroMaxWeight`] for degenerate configurations.
    pub fn new(name: impl Into<String>, config: SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        validate(&config)?;
        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Returns the generation parameters.
    #[must_use]
    #[rustfmt::skip]
    pub const fn config(&self) -> &SyntheticGraphConfig { &self.config }
}

impl GraphSource for SyntheticGraphSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Graph, LoadError> {
        build(&self.config).map_err(|error| LoadError::InvalidGraph {
            input: self.name.clone(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::connectivity::is_connected;

    #[rstest]
    #[case::undirected(Orientation::Undirected, 1)]
    #[case::undirected_many(Orientation::Undirected, 40)]
    #[case::directed(Orientation::Directed, 2)]
    #[case::directed_many(Orientation::Directed, 40)]
    fn generated_graphs_are_connected(#[case] orientation: Orientation, #[case] nodes: usize) {
        let config = SyntheticGraphConfig::new(nodes, nodes * 2, 11).with_orientation(orientation);
        let graph = generate(&config).expect("configuration is valid");
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.orientation(), orientation);
        assert!(is_connected(&graph));
    }

    #[test]
    fn same_seed_yields_same_graph() {
        let config = SyntheticGraphConfig::new(30, 60, 99).with_max_weight(5);
        let first = generate(&config).expect("valid");
        let second = generate(&config).expect("valid");
        assert_eq!(first, second);
        assert!(first.edges().iter().all(|edge| (1..=5).contains(&edge.weight())));
    }

    #[test]
    fn different_seeds_differ() {
        let first = generate(&SyntheticGraphConfig::new(30, 60, 1)).expect("valid");
        let second = generate(&SyntheticGraphConfig::new(30, 60, 2)).expect("valid");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case(SyntheticGraphConfig::new(0, 3, 1), SyntheticError::ZeroNodes)]
    #[case(SyntheticGraphConfig::new(3, 3, 1).with_max_weight(0), SyntheticError::ZeroMaxWeight)]
    fn rejects_degenerate_configuration(
        #[case] config: SyntheticGraphConfig,
        #[case] expected: SyntheticError,
    ) {
        assert_eq!(generate(&config), Err(expected));
    }

    #[test]
    fn source_rejects_degenerate_configuration() {
        let result = SyntheticGraphSource::new("empty", SyntheticGraphConfig::new(0, 0, 1));
        assert!(matches!(result, Err(SyntheticError::ZeroNodes)));
    }

    #[test]
    fn source_regenerates_identical_graphs() {
        let source = SyntheticGraphSource::new("synthetic", SyntheticGraphConfig::new(12, 20, 5))
            .expect("configuration is valid");
        assert_eq!(source.name(), "synthetic");
        let first = source.load().expect("valid");
        let second = source.load().expect("valid");
        assert_eq!(first, second);
    }
}
