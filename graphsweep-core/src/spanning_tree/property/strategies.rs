//! Graph generators for spanning-tree property tests.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Edge, Graph, Orientation, Weight};

use super::types::{SpanningFixture, WeightDistribution};

const MIN_NODES: usize = 4;
const MAX_NODES: usize = 40;
/// Dense graphs stay smaller to bound the pair count.
const DENSE_MAX_NODES: usize = 20;

pub(super) fn spanning_fixture_strategy() -> impl Strategy<Value = SpanningFixture> {
    (any::<WeightDistribution>(), any::<u64>()).prop_map(|(distribution, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(distribution, &mut rng)
    })
}

/// Generates a fixture for an explicit distribution.
pub(super) fn generate_fixture(distribution: WeightDistribution, rng: &mut SmallRng) -> SpanningFixture {
    let (node_count, edges) = match distribution {
        WeightDistribution::Unique => {
            let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
            let edges = connected_pairs(node_count, (0.2, 0.6), rng, |r| r.gen_range(1..=1_000_000));
            (node_count, edges)
        }
        WeightDistribution::ManyIdentical => {
            let pool: Vec<Weight> = (0..rng.gen_range(1..=3)).map(|_| rng.gen_range(1..=10)).collect();
            let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
            let edges = connected_pairs(node_count, (0.3, 0.7), rng, |r| pool[r.gen_range(0..pool.len())]);
            (node_count, edges)
        }
        WeightDistribution::Sparse => generate_sparse(rng),
        WeightDistribution::Dense => {
            let node_count = rng.gen_range(MIN_NODES..=DENSE_MAX_NODES);
            let edges = connected_pairs(node_count, (0.7, 0.95), rng, |r| r.gen_range(1..=100));
            (node_count, edges)
        }
        WeightDistribution::Disconnected => generate_disconnected(rng),
    };

    let graph = Graph::with_node_count(Orientation::Undirected, node_count, edges)
        .expect("generated edges are valid");
    SpanningFixture {
        graph,
        distribution,
    }
}

/// Samples every pair with a random probability, then links consecutive
/// nodes that ended up in different components so the result is connected.
fn connected_pairs(
    node_count: usize,
    probability: (f64, f64),
    rng: &mut SmallRng,
    mut weight: impl FnMut(&mut SmallRng) -> Weight,
) -> Vec<Edge> {
    let edge_probability = rng.gen_range(probability.0..=probability.1);
    let mut edges = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                edges.push(Edge::new(left, right, weight(rng)));
            }
        }
    }

    let mut parent: Vec<usize> = (0..node_count).collect();
    for edge in &edges {
        join(&mut parent, edge.source(), edge.target());
    }
    for node in 1..node_count {
        if join(&mut parent, node - 1, node) {
            edges.push(Edge::new(node - 1, node, weight(rng)));
        }
    }
    edges
}

fn generate_sparse(rng: &mut SmallRng) -> (usize, Vec<Edge>) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut order: Vec<usize> = (0..node_count).collect();
    shuffle(&mut order, rng);

    let mut edges = Vec::new();
    for pair in order.windows(2) {
        edges.push(Edge::new(pair[0], pair[1], rng.gen_range(1..=100)));
    }
    for _ in 0..rng.gen_range(node_count / 2..=node_count) {
        let left = rng.gen_range(0..node_count);
        let right = rng.gen_range(0..node_count);
        if left != right {
            edges.push(Edge::new(left, right, rng.gen_range(1..=100)));
        }
    }
    (node_count, edges)
}

fn generate_disconnected(rng: &mut SmallRng) -> (usize, Vec<Edge>) {
    let mut edges = Vec::new();
    let mut offset = 0;
    for _ in 0..rng.gen_range(2..=5) {
        let size = rng.gen_range(1..=8);
        for node in (offset + 1)..(offset + size) {
            let parent = rng.gen_range(offset..node);
            edges.push(Edge::new(parent, node, rng.gen_range(1..=20)));
        }
        for _ in 0..size {
            let left = rng.gen_range(offset..offset + size);
            let right = rng.gen_range(offset..offset + size);
            if left != right {
                edges.push(Edge::new(left, right, rng.gen_range(1..=20)));
            }
        }
        offset += size;
    }
    (offset, edges)
}

/// Returns `true` when `left` and `right` were in different sets.
fn join(parent: &mut [usize], left: usize, right: usize) -> bool {
    let left = find_root(parent, left);
    let right = find_root(parent, right);
    if left == right {
        return false;
    }
    parent[right] = left;
    true
}

/// Path-halving find shared with the oracle.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Fisher-Yates shuffle using the provided RNG.
fn shuffle(slice: &mut [usize], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}
