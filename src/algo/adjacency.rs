use rustc_hash::FxHashMap;

use crate::core::{marker::Outgoing, Graph};

/// Adjacency matrix of the graph in node order.
///
/// Cell `(i, j)` is 1 if there is an edge from the `i`-th to the `j`-th node.
/// The matrix of an undirected graph is symmetric and a self-loop sets one
/// diagonal cell.
pub fn adjacency_matrix<G>(graph: &G) -> Vec<Vec<u64>>
where
    G: Graph,
{
    let n = graph.order();
    let indices = graph
        .nodes()
        .enumerate()
        .map(|(i, node)| (node, i))
        .collect::<FxHashMap<_, _>>();

    let mut matrix = vec![vec![0; n]; n];

    for (i, node) in graph.nodes().enumerate() {
        for neighbor in graph.neighbors_directed(&node, Outgoing) {
            if let Some(&j) = indices.get(&neighbor) {
                matrix[i][j] = 1;
            }
        }
    }

    matrix
}

/// Product of two square matrices of the same size.
///
/// The arithmetic saturates, a cell that would exceed `u64::MAX` holds
/// `u64::MAX`.
///
/// # Panics
///
/// Panics if the matrices are not square or their sizes differ.
pub fn multiply(lhs: &[Vec<u64>], rhs: &[Vec<u64>]) -> Vec<Vec<u64>> {
    let n = lhs.len();
    assert_eq!(rhs.len(), n, "matrix sizes differ");

    let mut product = vec![vec![0u64; n]; n];

    for (i, row) in lhs.iter().enumerate() {
        assert_eq!(row.len(), n, "matrix is not square");

        for (k, &a) in row.iter().enumerate() {
            if a == 0 {
                continue;
            }

            for (j, &b) in rhs[k].iter().enumerate() {
                product[i][j] = product[i][j].saturating_add(a.saturating_mul(b));
            }
        }
    }

    product
}

/// Powers `A¹` to `Aᵏ` of the adjacency matrix.
///
/// Cell `(i, j)` of `Aᵖ` is the number of walks of length `p` from the `i`-th
/// to the `j`-th node. For `k = 0`, no matrix is returned. Walk counts grow
/// exponentially with the power, counts above `u64::MAX` saturate to
/// `u64::MAX`.
pub fn adjacency_matrix_powers<G>(graph: &G, k: usize) -> Vec<Vec<Vec<u64>>>
where
    G: Graph,
{
    let mut powers = Vec::with_capacity(k);

    if k == 0 {
        return powers;
    }

    let base = adjacency_matrix(graph);
    powers.push(base.clone());

    for _ in 1..k {
        let next = multiply(&powers[powers.len() - 1], &base);
        powers.push(next);
    }

    powers
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        core::Create,
        generate::complete_graph,
        infra::proptest::graph_input,
        storage::{MatrixGraph, SparseGraph},
    };

    #[test]
    fn cycle_matrix() {
        let graph = SparseGraph::<u32>::from_edges(
            false,
            0..4,
            [(0u32, 1u32), (1, 2), (2, 3), (3, 0)],
        );

        assert_eq!(
            adjacency_matrix(&graph),
            vec![
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn directed_matrix_is_not_symmetric() {
        let graph = MatrixGraph::<u32>::from_edges(true, 0..3, [(0u32, 1u32), (2, 2)]);

        assert_eq!(
            adjacency_matrix(&graph),
            vec![vec![0, 1, 0], vec![0, 0, 0], vec![0, 0, 1]]
        );
    }

    #[test]
    fn matrix_follows_node_order() {
        let graph = SparseGraph::<u32>::from_edges(true, [7, 3], [(3u32, 7u32)]);

        assert_eq!(adjacency_matrix(&graph), vec![vec![0, 0], vec![1, 0]]);
    }

    #[test]
    fn powers_count_walks() {
        let graph = SparseGraph::<u32>::from_edges(false, 0..3, [(0u32, 1u32), (1, 2)]);
        let powers = adjacency_matrix_powers(&graph, 3);

        assert_eq!(powers.len(), 3);
        assert_eq!(
            powers[1],
            vec![vec![1, 0, 1], vec![0, 2, 0], vec![1, 0, 1]]
        );
        assert_eq!(
            powers[2],
            vec![vec![0, 2, 0], vec![2, 0, 2], vec![0, 2, 0]]
        );
    }

    #[test]
    fn walk_counts_saturate() {
        let graph: SparseGraph<usize> = complete_graph(10, false);
        let powers = adjacency_matrix_powers(&graph, 25);

        assert_eq!(powers.len(), 25);
        assert_eq!(powers[1][0][0], 9);
        assert_eq!(powers[1][0][1], 8);
        assert_eq!(powers[24][0][0], u64::MAX);
        assert_eq!(powers[24][3][7], u64::MAX);
    }

    #[test]
    fn saturating_product() {
        let big = vec![vec![u64::MAX, 1], vec![1, 0]];

        assert_eq!(
            multiply(&big, &big),
            vec![vec![u64::MAX, u64::MAX], vec![u64::MAX, 1]]
        );
    }

    #[test]
    fn zero_power_is_empty() {
        let graph = SparseGraph::<u32>::from_edges(false, 0..3, [(0u32, 1u32)]);

        assert!(adjacency_matrix_powers(&graph, 0).is_empty());
    }

    #[test]
    fn empty_graph() {
        let graph = SparseGraph::<u32>::empty(false);

        assert!(adjacency_matrix(&graph).is_empty());
        assert_eq!(adjacency_matrix_powers(&graph, 2), vec![Vec::<Vec<u64>>::new(); 2]);
    }

    proptest! {
        #[test]
        fn first_power_is_adjacency_matrix(input in graph_input(10, 30), directed: bool) {
            let graph: SparseGraph<u32> = input.build(directed);
            let powers = adjacency_matrix_powers(&graph, 1);

            prop_assert_eq!(&powers[0], &adjacency_matrix(&graph));
        }

        #[test]
        fn storages_give_same_matrix(input in graph_input(10, 30), directed: bool) {
            let sparse: SparseGraph<u32> = input.build(directed);
            let matrix: MatrixGraph<u32> = input.build(directed);

            prop_assert_eq!(adjacency_matrix(&sparse), adjacency_matrix(&matrix));
        }
    }
}
