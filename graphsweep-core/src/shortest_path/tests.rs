//! Unit and oracle-based property tests for the shortest-path engine.

use proptest::prelude::*;
use rstest::rstest;

use crate::graph::{Graph, Orientation, Weight};
use crate::test_utils::{connected_graph_strategy, graph_from, suite_proptest_config};

use super::{ShortestPathError, shortest_paths};

/// Floyd–Warshall all-pairs distances; `None` marks unreachable pairs.
fn floyd_warshall(graph: &Graph) -> Vec<Vec<Option<Weight>>> {
    let n = graph.node_count();
    let mut dist = vec![vec![None; n]; n];
    for (node, row) in dist.iter_mut().enumerate() {
        row[node] = Some(0);
    }
    for (from, neighbours) in graph.adjacency().iter().enumerate() {
        for &(to, weight) in neighbours {
            if dist[from][to].is_none_or(|known| weight < known) {
                dist[from][to] = Some(weight);
            }
        }
    }
    for via in 0..n {
        for from in 0..n {
            let Some(left) = dist[from][via] else {
                continue;
            };
            for to in 0..n {
                let Some(right) = dist[via][to] else {
                    continue;
                };
                let candidate = left + right;
                if dist[from][to].is_none_or(|known| candidate < known) {
                    dist[from][to] = Some(candidate);
                }
            }
        }
    }
    dist
}

#[test]
fn computes_distances_and_paths_for_small_directed_graph() {
    let graph = graph_from(
        Orientation::Directed,
        3,
        &[(0, 1, 4), (1, 2, 1), (0, 2, 10)],
    );
    let result = shortest_paths(&graph, 0).expect("source is valid");

    let distances: Vec<_> = result.distances().iter().collect();
    assert_eq!(distances, vec![(0, Some(0)), (1, Some(4)), (2, Some(5))]);
    assert_eq!(result.paths().get(0), Some(&[0][..]));
    assert_eq!(result.paths().get(1), Some(&[0, 1][..]));
    assert_eq!(result.paths().get(2), Some(&[0, 1, 2][..]));
}

#[test]
fn source_distance_is_zero_for_non_zero_source() {
    let graph = graph_from(Orientation::Undirected, 3, &[(0, 1, 4), (1, 2, 1)]);
    let result = shortest_paths(&graph, 2).expect("source is valid");
    assert_eq!(result.source(), 2);
    assert_eq!(result.distances().get(2), Some(0));
    assert_eq!(result.paths().get(2), Some(&[2][..]));
    assert_eq!(result.distances().get(0), Some(5));
    assert_eq!(result.paths().get(0), Some(&[2, 1, 0][..]));
}

#[test]
fn unreachable_nodes_keep_infinite_distance_and_empty_path() {
    let graph = graph_from(Orientation::Directed, 4, &[(0, 1, 2), (2, 3, 1)]);
    let result = shortest_paths(&graph, 0).expect("source is valid");
    assert!(result.distances().is_reachable(1));
    assert!(!result.distances().is_reachable(2));
    assert_eq!(result.distances().get(3), None);
    assert_eq!(result.paths().get(3), Some(&[][..]));
    assert_eq!(result.path_weight(&graph, 3), None);
}

#[test]
fn directed_edges_are_not_walked_backwards() {
    let graph = graph_from(Orientation::Directed, 2, &[(1, 0, 1)]);
    let result = shortest_paths(&graph, 0).expect("source is valid");
    assert_eq!(result.distances().get(1), None);
}

#[test]
fn equal_cost_paths_keep_the_first_discovered_route() {
    // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2; node 1 is settled first, so
    // its route to 3 is recorded and the tie through node 2 is not taken.
    let graph = graph_from(
        Orientation::Directed,
        4,
        &[(0, 1, 1), (0, 2, 1), (2, 3, 1), (1, 3, 1)],
    );
    let result = shortest_paths(&graph, 0).expect("source is valid");
    assert_eq!(result.distances().get(3), Some(2));
    assert_eq!(result.paths().get(3), Some(&[0, 1, 3][..]));
}

#[rstest]
#[case::empty(Graph::from_edges(Orientation::Directed, []).expect("empty graph"), 0, ShortestPathError::EmptyGraph)]
#[case::out_of_range(
    graph_from(Orientation::Directed, 2, &[(0, 1, 1)]),
    2,
    ShortestPathError::SourceOutOfRange { source_node: 2, node_count: 2 },
)]
fn rejects_invalid_requests(
    #[case] graph: Graph,
    #[case] source: usize,
    #[case] expected: ShortestPathError,
) {
    assert_eq!(shortest_paths(&graph, source), Err(expected));
}

fn check_against_oracle(graph: &Graph, source: usize) -> Result<(), TestCaseError> {
    let source = source % graph.node_count();
    let result =
        shortest_paths(graph, source).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let oracle = floyd_warshall(graph);

    for node in 0..graph.node_count() {
        prop_assert_eq!(
            result.distances().get(node),
            oracle[source][node],
            "distance mismatch for node {}",
            node
        );
        let path = result.paths().get(node).unwrap_or_default();
        match result.distances().get(node) {
            Some(distance) => {
                prop_assert_eq!(path.first(), Some(&source));
                prop_assert_eq!(path.last(), Some(&node));
                prop_assert_eq!(result.path_weight(graph, node), Some(distance));
            }
            None => prop_assert!(path.is_empty()),
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn directed_distances_match_floyd_warshall(
        graph in connected_graph_strategy(Orientation::Directed),
        source in any::<usize>(),
    ) {
        check_against_oracle(&graph, source)?;
    }

    #[test]
    fn undirected_distances_match_floyd_warshall(
        graph in connected_graph_strategy(Orientation::Undirected),
        source in any::<usize>(),
    ) {
        check_against_oracle(&graph, source)?;
    }

    #[test]
    fn repeated_runs_are_identical(
        graph in connected_graph_strategy(Orientation::Directed),
    ) {
        let first = shortest_paths(&graph, 0).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let second = shortest_paths(&graph, 0).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(first, second);
    }
}
