//! Dense adjacency matrix representation.
//!
//! The matrix is indexed by the position of a node in the node order given at
//! construction. Directed graphs use the full square, undirected graphs only
//! the lower triangle, so that `(a, b)` and `(b, a)` share a single cell. A
//! self-loop sets one diagonal cell.
//!
//! # Examples
//!
//! ```
//! use tempograph::{core::{Create, Graph}, storage::MatrixGraph};
//!
//! let graph = MatrixGraph::from_edges(false, ["a", "b", "c"], [("a", "b"), ("b", "c")]);
//!
//! assert!(graph.adjacent(&"b", &"a"));
//! assert_eq!(graph.degree(&"b"), 2);
//! assert_eq!(graph.index_of(&"c"), Some(2));
//! ```

use std::{fmt, hash::Hash, iter::Cloned, slice};

use bitvec::prelude::*;
use rustc_hash::FxHashMap;

use crate::core::{
    marker::{Direction, Incoming, Outgoing},
    matrix, Create, Edge, Graph,
};

use super::shared;

#[derive(Clone)]
pub struct MatrixGraph<N> {
    directed: bool,
    nodes: Vec<N>,
    indices: FxHashMap<N, usize>,
    matrix: BitVec,
    n_edges: usize,
}

impl<N: Clone + Eq + Hash> MatrixGraph<N> {
    /// Position of the node in the node order, which is also its row and
    /// column in the matrix.
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.indices.get(node).copied()
    }

    fn cell(&self, row: usize, col: usize) -> bool {
        self.matrix[matrix::index(self.directed, row, col, self.nodes.len())]
    }

    fn neighbors_iter(&self, node: &N, filter: Option<Direction>) -> NeighborsIter<'_, N> {
        NeighborsIter {
            graph: self,
            src: self.index_of(node),
            other: 0,
            filter,
        }
    }
}

impl<N: Clone + Eq + Hash> Create for MatrixGraph<N> {
    fn from_edges<I, E, V>(directed: bool, nodes: V, edges: I) -> Self
    where
        V: IntoIterator<Item = N>,
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
    {
        let input = shared::index_input(nodes, edges);
        let node_count = input.nodes.len();

        let mut matrix = bitvec![0; matrix::linear_len(directed, node_count)];
        let mut n_edges = 0;

        for (src, dst) in input.edges {
            let index = matrix::index(directed, src, dst, node_count);

            if !matrix.replace(index, true) {
                n_edges += 1;
            }
        }

        Self {
            directed,
            nodes: input.nodes,
            indices: input.indices,
            matrix,
            n_edges,
        }
    }
}

impl<N: Clone + Eq + Hash> Graph for MatrixGraph<N> {
    type Node = N;

    type NodesIter<'a> = Cloned<slice::Iter<'a, N>>
    where
        Self: 'a;

    type NeighborsIter<'a> = NeighborsIter<'a, N>
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
        self.indices.contains_key(node)
    }

    fn adjacent(&self, src: &N, dst: &N) -> bool {
        match (self.index_of(src), self.index_of(dst)) {
            (Some(src), Some(dst)) => self.cell(src, dst),
            _ => false,
        }
    }

    fn neighbors(&self, node: &N) -> Self::NeighborsIter<'_> {
        if self.directed {
            self.neighbors_iter(node, None)
        } else {
            self.neighbors_iter(node, Some(Outgoing))
        }
    }

    fn neighbors_directed(&self, node: &N, dir: Direction) -> Self::NeighborsIter<'_> {
        if self.directed {
            self.neighbors_iter(node, Some(dir))
        } else {
            // Use only the outgoing direction for undirected graphs.
            self.neighbors_iter(node, Some(Outgoing))
        }
    }

    fn edge_count(&self) -> usize {
        self.n_edges
    }
}

pub struct NeighborsIter<'a, N> {
    graph: &'a MatrixGraph<N>,
    src: Option<usize>,
    other: usize,
    // None means both directions.
    filter: Option<Direction>,
}

impl<'a, N: Clone + Eq + Hash> Iterator for NeighborsIter<'a, N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src?;

        while self.other < self.graph.nodes.len() {
            let other = self.other;
            self.other += 1;

            let connected = match self.filter {
                Some(Outgoing) => self.graph.cell(src, other),
                Some(Incoming) => self.graph.cell(other, src),
                None => self.graph.cell(src, other) || self.graph.cell(other, src),
            };

            if connected {
                return Some(self.graph.nodes[other].clone());
            }
        }

        None
    }
}

impl<N: fmt::Debug> fmt::Debug for MatrixGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let n = self.nodes.len();
            writeln!(f, "MatrixGraph {:?} {{", self.nodes)?;
            for row in 0..n {
                write!(f, "    ")?;
                for col in 0..n {
                    if col > 0 {
                        write!(f, " ")?;
                    }

                    let index = matrix::index(self.directed, row, col, n);
                    write!(f, "{}", self.matrix[index] as usize)?;
                }
                writeln!(f)?;
            }
            writeln!(f, "}}")
        } else {
            f.debug_struct("MatrixGraph")
                .field("directed", &self.directed)
                .field("nodes", &self.nodes)
                .field("n_edges", &self.n_edges)
                .finish()
        }
    }
}
