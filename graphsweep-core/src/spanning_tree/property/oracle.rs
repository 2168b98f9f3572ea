//! Sequential Kruskal oracle for spanning-tree property checks.

use crate::graph::{Graph, Weight};

use super::strategies::find_root;

/// Minimum spanning forest summary produced by the oracle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct KruskalForest {
    pub total_weight: Weight,
    pub edge_count: usize,
    pub component_count: usize,
}

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// Edges are taken in `(weight, edge index)` order; any minimum spanning
/// forest has the same total weight, so only the totals are compared.
pub(super) fn sequential_kruskal(graph: &Graph) -> KruskalForest {
    let node_count = graph.node_count();
    let mut order: Vec<usize> = (0..graph.edge_count()).collect();
    order.sort_by_key(|&index| graph.edges()[index].weight());

    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut forest = KruskalForest {
        total_weight: 0,
        edge_count: 0,
        component_count: node_count,
    };
    for index in order {
        let edge = graph.edges()[index];
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left != right {
            parent[right] = left;
            forest.total_weight += edge.weight();
            forest.edge_count += 1;
            forest.component_count -= 1;
        }
    }
    forest
}

#[cfg(test)]
mod tests {
    use crate::graph::Orientation;
    use crate::test_utils::graph_from;

    use super::*;

    #[test]
    fn oracle_reports_forest_of_disconnected_graph() {
        let graph = graph_from(
            Orientation::Undirected,
            5,
            &[(0, 1, 2), (1, 2, 1), (0, 2, 1), (3, 4, 7)],
        );
        assert_eq!(
            sequential_kruskal(&graph),
            KruskalForest {
                total_weight: 9,
                edge_count: 3,
                component_count: 2,
            }
        );
    }
}
