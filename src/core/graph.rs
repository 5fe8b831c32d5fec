use std::{hash::Hash, sync::Arc};

use rustc_hash::FxHashSet;

use super::marker::{Direction, Incoming, Outgoing};

/// The minimal read interface every representation and view satisfies.
///
/// # Node order
///
/// [`nodes`](Graph::nodes) yields every node exactly once, in an order that is
/// stable for the lifetime of the graph. This order is the basis for
/// adjacency matrix indexing in [`algo`](crate::algo).
///
/// # Degree convention
///
/// * In undirected graphs, the degree is the number of distinct neighbors. A
///   self-loop therefore counts **once** and the node lists itself among its
///   neighbors.
/// * In directed graphs, the degree is the sum of out-degree and in-degree. A
///   self-loop contributes one to each, hence two in total.
///
/// # Absent nodes
///
/// Querying a node that is not in the graph is not an error: `contains`
/// returns false, `adjacent` returns false, `neighbors` is empty and `degree`
/// is zero.
pub trait Graph {
    type Node: Clone + Eq + Hash;

    type NodesIter<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    type NeighborsIter<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    fn is_directed(&self) -> bool;

    fn order(&self) -> usize;

    fn nodes(&self) -> Self::NodesIter<'_>;

    fn contains(&self, node: &Self::Node) -> bool;

    /// Returns true if there is an edge from `src` to `dst`. In undirected
    /// graphs, the order of the arguments does not matter.
    fn adjacent(&self, src: &Self::Node, dst: &Self::Node) -> bool;

    /// All nodes connected to `node` by an edge of any direction, each yielded
    /// once, in unspecified order.
    fn neighbors(&self, node: &Self::Node) -> Self::NeighborsIter<'_>;

    /// Nodes connected to `node` by an edge of given direction. The direction
    /// is ignored in undirected graphs.
    fn neighbors_directed(&self, node: &Self::Node, dir: Direction) -> Self::NeighborsIter<'_>;

    fn degree(&self, node: &Self::Node) -> usize {
        if self.is_directed() {
            self.degree_directed(node, Outgoing) + self.degree_directed(node, Incoming)
        } else {
            self.neighbors(node).count()
        }
    }

    fn degree_directed(&self, node: &Self::Node, dir: Direction) -> usize {
        self.neighbors_directed(node, dir).count()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Returns every edge exactly once, ordered by the source in node order.
    /// Undirected edges are reported with the endpoint that comes first in
    /// node order as the source.
    fn edges(&self) -> Vec<(Self::Node, Self::Node)> {
        let mut edges = Vec::new();

        if self.is_directed() {
            for src in self.nodes() {
                for dst in self.neighbors_directed(&src, Outgoing) {
                    edges.push((src.clone(), dst));
                }
            }
        } else {
            let mut finished = FxHashSet::default();

            for src in self.nodes() {
                for dst in self.neighbors(&src) {
                    if !finished.contains(&dst) {
                        edges.push((src.clone(), dst));
                    }
                }

                finished.insert(src);
            }
        }

        edges
    }
}

macro_rules! deref_graph {
    ($($ref_kind:tt)*) => {
        impl<G> Graph for $($ref_kind)*
        where
            G: Graph,
        {
            type Node = G::Node;

            type NodesIter<'a> = G::NodesIter<'a>
            where
                Self: 'a;

            type NeighborsIter<'a> = G::NeighborsIter<'a>
            where
                Self: 'a;

            fn is_directed(&self) -> bool {
                (**self).is_directed()
            }

            fn order(&self) -> usize {
                (**self).order()
            }

            fn nodes(&self) -> Self::NodesIter<'_> {
                (**self).nodes()
            }

            fn contains(&self, node: &Self::Node) -> bool {
                (**self).contains(node)
            }

            fn adjacent(&self, src: &Self::Node, dst: &Self::Node) -> bool {
                (**self).adjacent(src, dst)
            }

            fn neighbors(&self, node: &Self::Node) -> Self::NeighborsIter<'_> {
                (**self).neighbors(node)
            }

            fn neighbors_directed(&self, node: &Self::Node, dir: Direction) -> Self::NeighborsIter<'_> {
                (**self).neighbors_directed(node, dir)
            }

            fn degree(&self, node: &Self::Node) -> usize {
                (**self).degree(node)
            }

            fn degree_directed(&self, node: &Self::Node, dir: Direction) -> usize {
                (**self).degree_directed(node, dir)
            }

            fn edge_count(&self) -> usize {
                (**self).edge_count()
            }

            fn edges(&self) -> Vec<(Self::Node, Self::Node)> {
                (**self).edges()
            }
        }
    }
}

deref_graph!(&G);
deref_graph!(&mut G);
deref_graph!(Arc<G>);
