//! Adjacency set representation.
//!
//! Every node maps to the set of its outgoing and incoming neighbors.
//! Undirected graphs use only the outgoing set, which then contains all
//! neighbors. A self-loop puts the node into its own set.
//!
//! # Examples
//!
//! ```
//! use tempograph::{core::{Create, Graph}, storage::SparseGraph};
//!
//! let graph = SparseGraph::from_edges(true, [1, 2, 3], [(1, 2), (3, 2)]);
//!
//! assert!(graph.adjacent(&1, &2));
//! assert!(!graph.adjacent(&2, &1));
//! assert_eq!(graph.degree(&2), 2);
//! ```

use std::{hash::Hash, iter::Cloned, slice, vec};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{
    marker::{Direction, Incoming, Outgoing},
    Create, Edge, Graph,
};

use super::shared;

#[derive(Debug, Clone)]
struct Adjacency<N> {
    outgoing: FxHashSet<N>,
    incoming: FxHashSet<N>,
}

impl<N> Default for Adjacency<N> {
    fn default() -> Self {
        Self {
            outgoing: FxHashSet::default(),
            incoming: FxHashSet::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SparseGraph<N> {
    directed: bool,
    nodes: Vec<N>,
    adjacency: FxHashMap<N, Adjacency<N>>,
    n_edges: usize,
}

impl<N: Clone + Eq + Hash> SparseGraph<N> {
    /// Materializes any graph, typically a view, into a standalone sparse
    /// graph with the same node order and topology.
    pub fn copy_of<G>(graph: &G) -> Self
    where
        G: Graph<Node = N>,
    {
        Self::from_edges(graph.is_directed(), graph.nodes(), graph.edges())
    }

    fn set(&self, node: &N, dir: Direction) -> Option<&FxHashSet<N>> {
        let adjacency = self.adjacency.get(node)?;

        match dir {
            Outgoing => Some(&adjacency.outgoing),
            Incoming if self.directed => Some(&adjacency.incoming),
            Incoming => Some(&adjacency.outgoing),
        }
    }
}

impl<N: Clone + Eq + Hash> Create for SparseGraph<N> {
    fn from_edges<I, E, V>(directed: bool, nodes: V, edges: I) -> Self
    where
        V: IntoIterator<Item = N>,
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
    {
        let input = shared::index_input(nodes, edges);

        let mut adjacency = input
            .nodes
            .iter()
            .map(|node| (node.clone(), Adjacency::default()))
            .collect::<FxHashMap<_, _>>();
        let mut n_edges = 0;

        for (src, dst) in input.edges {
            let src = &input.nodes[src];
            let dst = &input.nodes[dst];

            let inserted = match adjacency.get_mut(src) {
                Some(adj) => adj.outgoing.insert(dst.clone()),
                None => false,
            };

            if !inserted {
                continue;
            }

            n_edges += 1;

            if let Some(adj) = adjacency.get_mut(dst) {
                if directed {
                    adj.incoming.insert(src.clone());
                } else {
                    adj.outgoing.insert(src.clone());
                }
            }
        }

        Self {
            directed,
            nodes: input.nodes,
            adjacency,
            n_edges,
        }
    }
}

impl<N: Clone + Eq + Hash> Graph for SparseGraph<N> {
    type Node = N;

    type NodesIter<'a> = Cloned<slice::Iter<'a, N>>
    where
        Self: 'a;

    type NeighborsIter<'a> = vec::IntoIter<N>
    where
        Self: 'a;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn order(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self) -> Self::NodesIter<'_> {
        self.nodes.iter().cloned()
    }

    fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn adjacent(&self, src: &N, dst: &N) -> bool {
        self.set(src, Outgoing)
            .map_or(false, |outgoing| outgoing.contains(dst))
    }

    fn neighbors(&self, node: &N) -> Self::NeighborsIter<'_> {
        let Some(adjacency) = self.adjacency.get(node) else {
            return Vec::new().into_iter();
        };

        if self.directed {
            adjacency
                .outgoing
                .union(&adjacency.incoming)
                .cloned()
                .collect::<Vec<_>>()
                .into_iter()
        } else {
            adjacency
                .outgoing
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .into_iter()
        }
    }

    fn neighbors_directed(&self, node: &N, dir: Direction) -> Self::NeighborsIter<'_> {
        self.set(node, dir)
            .map(|set| set.iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
    }

    fn degree(&self, node: &N) -> usize {
        match self.adjacency.get(node) {
            Some(adjacency) if self.directed => {
                adjacency.outgoing.len() + adjacency.incoming.len()
            }
            Some(adjacency) => adjacency.outgoing.len(),
            None => 0,
        }
    }

    fn degree_directed(&self, node: &N, dir: Direction) -> usize {
        self.set(node, dir).map_or(0, |set| set.len())
    }

    fn edge_count(&self) -> usize {
        self.n_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infra::testing::check_same_topology,
        storage::{tests::*, MatrixGraph},
    };

    #[test]
    fn basic_undirected() {
        test_basic::<SparseGraph<_>>(false);
    }

    #[test]
    fn basic_directed() {
        test_basic::<SparseGraph<_>>(true);
    }

    #[test]
    fn absent_nodes_undirected() {
        test_absent_nodes::<SparseGraph<_>>(false);
    }

    #[test]
    fn absent_nodes_directed() {
        test_absent_nodes::<SparseGraph<_>>(true);
    }

    #[test]
    fn input_normalization_undirected() {
        test_input_normalization::<SparseGraph<_>>(false);
    }

    #[test]
    fn input_normalization_directed() {
        test_input_normalization::<SparseGraph<_>>(true);
    }

    #[test]
    fn copy_of_matrix() {
        let matrix = MatrixGraph::<char>::from_edges(
            true,
            ['a', 'b', 'c'],
            [('a', 'b'), ('b', 'c'), ('c', 'c')],
        );
        let copy = SparseGraph::copy_of(&matrix);

        assert_eq!(copy.nodes().collect::<String>(), "abc");
        check_same_topology(&matrix, &copy).unwrap();
    }

    #[test]
    fn directed_self_loop_degree() {
        let graph = SparseGraph::<u8>::from_edges(true, [0], [(0u8, 0u8)]);

        assert_eq!(graph.degree_directed(&0, Direction::Outgoing), 1);
        assert_eq!(graph.degree_directed(&0, Direction::Incoming), 1);
        assert_eq!(graph.degree(&0), 2);
        assert_eq!(graph.neighbors(&0).collect::<Vec<_>>(), vec![0]);
    }
}
