use std::{fmt, iter::Cloned, slice};

use rustc_hash::FxHashSet;

use crate::core::{marker::Direction, Graph};

/// Induced subgraph on a subset of the parent's nodes.
///
/// Two nodes of the subgraph are adjacent if and only if they are adjacent in
/// the parent. Nodes are yielded in the parent's relative order. Requested
/// nodes that are not in the parent are ignored.
///
/// # Examples
///
/// ```
/// use tempograph::{adapt::Subgraph, core::{Create, Graph}, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, 0..4, [(0, 1), (1, 2), (2, 3)]);
/// let sub = Subgraph::new(&graph, [2, 1, 3]);
///
/// assert_eq!(sub.nodes().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert!(!sub.contains(&0));
/// assert_eq!(sub.degree(&1), 1);
/// assert_eq!(sub.edge_count(), 2);
/// ```
pub struct Subgraph<'a, G>
where
    G: Graph,
{
    graph: &'a G,
    nodes: Vec<G::Node>,
    members: FxHashSet<G::Node>,
}

impl<'a, G> Subgraph<'a, G>
where
    G: Graph,
{
    pub fn new<S>(graph: &'a G, subset: S) -> Self
    where
        S: IntoIterator<Item = G::Node>,
    {
        let requested = subset.into_iter().collect::<FxHashSet<_>>();
        let nodes = graph
            .nodes()
            .filter(|node| requested.contains(node))
            .collect::<Vec<_>>();
        let members = nodes.iter().cloned().collect();

        Self {
            graph,
            nodes,
            members,
        }
    }

    pub fn parent(&self) -> &'a G {
        self.graph
    }
}

impl<G> fmt::Debug for Subgraph<'_, G>
where
    G: Graph + fmt::Debug,
    G::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subgraph")
            .field("graph", &self.graph)
            .field("nodes", &self.nodes)
            .field("members", &self.members)
            .finish()
    }
}

impl<G> Graph for Subgraph<'_, G>
where
    G: Graph,
{
    type Node = G::Node;

    type NodesIter<'b> = Cloned<slice::Iter<'b, G::Node>>
    where
        Self: 'b;

    type NeighborsIter<'b> = SubgraphIter<'b, G::NeighborsIter<'b>, G::Node>
    where
        Self: 'b;

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn order(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self) -> Self::NodesIter<'_> {
        self.nodes.iter().cloned()
    }

    fn contains(&self, node: &G::Node) -> bool {
        self.members.contains(node)
    }

    fn adjacent(&self, src: &G::Node, dst: &G::Node) -> bool {
        self.contains(src) && self.contains(dst) && self.graph.adjacent(src, dst)
    }

    fn neighbors(&self, node: &G::Node) -> Self::NeighborsIter<'_> {
        let inner = self.contains(node).then(|| self.graph.neighbors(node));
        SubgraphIter::new(inner, &self.members)
    }

    fn neighbors_directed(&self, node: &G::Node, dir: Direction) -> Self::NeighborsIter<'_> {
        let inner = self
            .contains(node)
            .then(|| self.graph.neighbors_directed(node, dir));
        SubgraphIter::new(inner, &self.members)
    }
}

/// Iterator over parent items restricted to the members of a view.
pub struct SubgraphIter<'a, I, N> {
    inner: Option<I>,
    members: &'a FxHashSet<N>,
}

impl<'a, I, N> SubgraphIter<'a, I, N> {
    fn new(inner: Option<I>, members: &'a FxHashSet<N>) -> Self {
        Self { inner, members }
    }
}

impl<I, N> Iterator for SubgraphIter<'_, I, N>
where
    I: Iterator<Item = N>,
    N: Eq + std::hash::Hash,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let members = self.members;
        self.inner.as_mut()?.find(|node| members.contains(node))
    }
}
