//! Property runners: oracle equivalence, structural invariants and
//! determinism.

use proptest::prop_assert_eq;
use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::graph::Edge;
use crate::spanning_tree::{SpanningTree, SpanningTreeError, minimum_spanning_tree};

use super::oracle::sequential_kruskal;
use super::strategies::find_root;
use super::types::SpanningFixture;

fn fail_context(fixture: &SpanningFixture, message: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(format!(
        "{message} (distribution={:?}, nodes={}, edges={})",
        fixture.distribution,
        fixture.graph.node_count(),
        fixture.graph.edge_count(),
    ))
}

/// The tree weight matches Kruskal; disconnected inputs report the same
/// component count the oracle finds.
pub(super) fn run_oracle_equivalence_property(fixture: &SpanningFixture) -> TestCaseResult {
    let oracle = sequential_kruskal(&fixture.graph);
    match minimum_spanning_tree(&fixture.graph) {
        Ok(tree) => {
            prop_assert_eq!(oracle.component_count, 1);
            prop_assert_eq!(tree.total_weight(), oracle.total_weight);
            prop_assert_eq!(tree.edges().len(), oracle.edge_count);
        }
        Err(SpanningTreeError::DisconnectedInput {
            node_count,
            tree_edges,
            components,
        }) => {
            prop_assert_eq!(node_count, fixture.graph.node_count());
            prop_assert_eq!(components, oracle.component_count);
            prop_assert_eq!(tree_edges, oracle.edge_count);
        }
        Err(other) => return Err(fail_context(fixture, other)),
    }
    Ok(())
}

/// Connected inputs yield `n - 1` canonical, sorted, acyclic edges drawn
/// from the input.
pub(super) fn run_structural_invariants_property(fixture: &SpanningFixture) -> TestCaseResult {
    let Ok(tree) = minimum_spanning_tree(&fixture.graph) else {
        return Ok(());
    };
    let node_count = fixture.graph.node_count();
    prop_assert_eq!(tree.edges().len(), node_count - 1);

    for edge in tree.edges() {
        if edge.source() >= edge.target() {
            return Err(fail_context(fixture, format!("edge {edge} is not canonical")));
        }
        if !fixture.graph.edges().contains(edge) {
            return Err(fail_context(fixture, format!("edge {edge} is not in the input")));
        }
    }
    if !tree.edges().is_sorted() {
        return Err(fail_context(fixture, "tree edges are not sorted"));
    }
    check_acyclic(fixture, &tree)?;
    let sum: u64 = tree.edges().iter().map(Edge::weight).sum();
    prop_assert_eq!(sum, tree.total_weight());
    Ok(())
}

fn check_acyclic(fixture: &SpanningFixture, tree: &SpanningTree) -> TestCaseResult {
    let mut parent: Vec<usize> = (0..fixture.graph.node_count()).collect();
    for edge in tree.edges() {
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left == right {
            return Err(fail_context(fixture, format!("edge {edge} closes a cycle")));
        }
        parent[right] = left;
    }
    Ok(())
}

/// Repeated runs return identical trees.
pub(super) fn run_determinism_property(fixture: &SpanningFixture) -> TestCaseResult {
    let first = minimum_spanning_tree(&fixture.graph);
    for _ in 0..3 {
        prop_assert_eq!(&minimum_spanning_tree(&fixture.graph), &first);
    }
    Ok(())
}
