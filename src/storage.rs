//! Implementations of the graph representations.
//!
//! A _storage_ is an implementation of the graph representation. Both storages
//! are built once from a node list and an edge list (see
//! [`Create`](crate::core::Create)) and are immutable afterwards.
//!
//! # Storages and their properties
//!
//! |               | **[SparseGraph]** | **[MatrixGraph]** |
//! |---------------|-------------------|-------------------|
//! | adjacent      | _O(1)_ average    | _O(1)_            |
//! | get neighbors | _O(d)_            | _O(n)_            |
//! | degree        | _O(1)_            | _O(n)_            |
//! | space         | _O(n + m)_        | _O(n²)_           |
//!
//! * _n_ – node count
//! * _m_ – edge count
//! * _d_ – node degree
//!
//! Both storages follow the same [degree convention](crate::core::Graph) and
//! give identical answers for identical input.

pub mod matrix;
mod shared;
pub mod sparse;

#[doc(inline)]
pub use self::{matrix::MatrixGraph, sparse::SparseGraph};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    use crate::{
        core::{marker::Direction, Create},
        infra::{
            proptest::graph_input,
            testing::{check_consistency, check_same_topology, AsEdgeList},
        },
    };

    use super::*;

    pub fn test_basic<G>(directed: bool)
    where
        G: Create<Node = u32>,
    {
        let graph = G::from_edges(
            directed,
            [0, 1, 2, 3],
            [(0u32, 1u32), (0, 2), (2, 1), (2, 3), (3, 3)],
        );

        assert_eq!(graph.order(), 4);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.is_directed(), directed);

        assert!(graph.adjacent(&0, &1));
        assert_eq!(graph.adjacent(&1, &0), !directed);
        assert!(!graph.adjacent(&0, &3));
        assert!(graph.adjacent(&3, &3));

        let neighbors = graph.neighbors(&2).collect::<FxHashSet<_>>();
        assert_eq!(neighbors, [0, 1, 3].into_iter().collect());

        if directed {
            assert_eq!(graph.degree(&2), 3);
            assert_eq!(graph.degree_directed(&2, Direction::Outgoing), 2);
            assert_eq!(graph.degree_directed(&2, Direction::Incoming), 1);
            // Self-loop is both outgoing and incoming.
            assert_eq!(graph.degree(&3), 3);
        } else {
            assert_eq!(graph.degree(&2), 3);
            // Self-loop counts once, but the node is its own neighbor.
            assert_eq!(graph.degree(&3), 2);
            assert!(graph.neighbors(&3).any(|n| n == 3));
        }

        check_consistency(&graph).unwrap();
    }

    pub fn test_absent_nodes<G>(directed: bool)
    where
        G: Create<Node = u32>,
    {
        let graph = G::from_edges(directed, [0, 1], [(0u32, 1u32)]);

        assert!(!graph.contains(&7));
        assert!(!graph.adjacent(&0, &7));
        assert!(!graph.adjacent(&7, &7));
        assert_eq!(graph.degree(&7), 0);
        assert_eq!(graph.neighbors(&7).count(), 0);
        assert_eq!(graph.neighbors_directed(&7, Direction::Incoming).count(), 0);
    }

    pub fn test_input_normalization<G>(directed: bool)
    where
        G: Create<Node = u32>,
    {
        // Duplicate node, duplicate edge, and endpoint missing from the node
        // list.
        let graph = G::from_edges(directed, [2, 0, 2], [(0u32, 2u32), (0, 2), (2, 5)]);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![2, 0, 5]);
        assert_eq!(graph.edge_count(), 2);

        let reversed = G::from_edges(directed, [0, 1], [(0u32, 1u32), (1, 0)]);
        let expected = if directed { 2 } else { 1 };
        assert_eq!(reversed.edge_count(), expected);
    }

    #[test]
    fn storages_agree_on_fixed_input() {
        for directed in [false, true] {
            let nodes = [1, 2, 3, 4, 5, 6, 10, 11, 15, 20, 21];
            let edges = [
                (1u32, 2u32),
                (2, 1),
                (2, 3),
                (2, 4),
                (2, 5),
                (1, 6),
                (6, 6),
                (6, 10),
                (10, 11),
                (11, 1),
                (15, 15),
                (20, 21),
            ];

            let matrix = MatrixGraph::<u32>::from_edges(directed, nodes, edges);
            let sparse = SparseGraph::<u32>::from_edges(directed, nodes, edges);

            check_same_topology(&matrix, &sparse).unwrap();
        }
    }

    proptest! {
        #[test]
        fn storages_agree_undirected(input in graph_input(12, 40)) {
            let matrix: MatrixGraph<u32> = input.build(false);
            let sparse: SparseGraph<u32> = input.build(false);

            prop_assert_eq!(check_consistency(&matrix), Ok(()));
            prop_assert_eq!(check_consistency(&sparse), Ok(()));
            prop_assert_eq!(
                check_same_topology(&matrix, &sparse),
                Ok(()),
                "{:?}",
                AsEdgeList(&sparse)
            );
        }

        #[test]
        fn storages_agree_directed(input in graph_input(12, 40)) {
            let matrix: MatrixGraph<u32> = input.build(true);
            let sparse: SparseGraph<u32> = input.build(true);

            prop_assert_eq!(check_consistency(&matrix), Ok(()));
            prop_assert_eq!(check_consistency(&sparse), Ok(()));
            prop_assert_eq!(
                check_same_topology(&matrix, &sparse),
                Ok(()),
                "{:?}",
                AsEdgeList(&sparse)
            );
        }
    }
}
