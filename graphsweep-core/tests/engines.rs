//! End-to-end checks of the public engine API.

mod common;

use common::graph;
use graphsweep_core::{
    Edge, Orientation, RemovalPercent, is_connected, minimum_spanning_tree, prune, shortest_paths,
};
use rstest::rstest;

#[test]
fn shortest_paths_end_to_end_example() {
    let graph = graph(Orientation::Directed, &[(0, 1, 4), (1, 2, 1), (0, 2, 10)]);
    let result = shortest_paths(&graph, 0).expect("source 0 exists");

    let distances: Vec<_> = result.distances().iter().map(|(_, d)| d).collect();
    assert_eq!(distances, vec![Some(0), Some(4), Some(5)]);
    let paths: Vec<_> = result.paths().iter().map(|(_, p)| p.to_vec()).collect();
    assert_eq!(paths, vec![vec![0], vec![0, 1], vec![0, 1, 2]]);
}

#[test]
fn spanning_tree_end_to_end_example() {
    let graph = graph(Orientation::Undirected, &[(0, 1, 1), (1, 2, 2), (0, 2, 3)]);
    let tree = minimum_spanning_tree(&graph).expect("triangle is connected");
    assert_eq!(tree.edges(), &[Edge::new(0, 1, 1), Edge::new(1, 2, 2)]);
    assert_eq!(tree.total_weight(), 3);
}

#[rstest]
#[case::light(10)]
#[case::half(50)]
#[case::all(100)]
fn pruned_graph_still_feeds_both_engines(#[case] raw: u8) {
    let graph = graph(
        Orientation::Undirected,
        &[(0, 1, 3), (1, 2, 1), (2, 3, 4), (3, 0, 1), (0, 2, 5), (1, 3, 9)],
    );
    let percent = RemovalPercent::new(raw).expect("valid percentage");
    let pruned = prune(&graph, percent).expect("graph is connected");
    assert!(is_connected(pruned.graph()));

    let tree = minimum_spanning_tree(pruned.graph()).expect("pruned graph is connected");
    assert_eq!(tree.edges().len(), 3);
    let paths = shortest_paths(pruned.graph(), 0).expect("source 0 exists");
    assert!((0..4).all(|node| paths.distances().is_reachable(node)));
}

#[test]
fn disconnected_components_are_reported() {
    let graph = graph(Orientation::Undirected, &[(0, 1, 1), (2, 3, 1), (4, 5, 1)]);
    let err = minimum_spanning_tree(&graph).expect_err("three components");
    assert_eq!(err.code().as_str(), "SPANNING_TREE_DISCONNECTED_INPUT");
    assert!(err.to_string().contains("3 components remain"));
}
