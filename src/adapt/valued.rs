use rustc_hash::FxHashMap;

use crate::core::{marker::Direction, Edge, Graph};

macro_rules! delegate_graph {
    ($($field:ident).+) => {
        type Node = G::Node;

        type NodesIter<'a> = G::NodesIter<'a>
        where
            Self: 'a;

        type NeighborsIter<'a> = G::NeighborsIter<'a>
        where
            Self: 'a;

        fn is_directed(&self) -> bool {
            self.$($field).+.is_directed()
        }

        fn order(&self) -> usize {
            self.$($field).+.order()
        }

        fn nodes(&self) -> Self::NodesIter<'_> {
            self.$($field).+.nodes()
        }

        fn contains(&self, node: &Self::Node) -> bool {
            self.$($field).+.contains(node)
        }

        fn adjacent(&self, src: &Self::Node, dst: &Self::Node) -> bool {
            self.$($field).+.adjacent(src, dst)
        }

        fn neighbors(&self, node: &Self::Node) -> Self::NeighborsIter<'_> {
            self.$($field).+.neighbors(node)
        }

        fn neighbors_directed(&self, node: &Self::Node, dir: Direction) -> Self::NeighborsIter<'_> {
            self.$($field).+.neighbors_directed(node, dir)
        }

        fn degree(&self, node: &Self::Node) -> usize {
            self.$($field).+.degree(node)
        }

        fn degree_directed(&self, node: &Self::Node, dir: Direction) -> usize {
            self.$($field).+.degree_directed(node, dir)
        }

        fn edge_count(&self) -> usize {
            self.$($field).+.edge_count()
        }

        fn edges(&self) -> Vec<(Self::Node, Self::Node)> {
            self.$($field).+.edges()
        }
    };
}

/// Graph with a value attached to its nodes.
///
/// The topology is delegated to the wrapped graph. Values are kept in a side
/// table. Setting a value of a node that is not in the graph is silently
/// ignored, so that a wrapper over a growing graph can be updated without
/// synchronizing with the growth first.
///
/// # Examples
///
/// ```
/// use tempograph::{adapt::ValuedGraphWrapper, core::{Create, Graph}, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, ["a", "b"], [("a", "b")]);
/// let mut valued = ValuedGraphWrapper::new(graph);
///
/// valued.set_value("a", 1.5);
/// valued.set_value("z", 2.0);
///
/// assert_eq!(valued.value(&"a"), Some(&1.5));
/// assert_eq!(valued.value(&"b"), None);
/// assert_eq!(valued.value(&"z"), None);
/// assert!(valued.adjacent(&"b", &"a"));
/// ```
#[derive(Debug, Clone)]
pub struct ValuedGraphWrapper<G, V>
where
    G: Graph,
{
    graph: G,
    values: FxHashMap<G::Node, V>,
}

impl<G, V> ValuedGraphWrapper<G, V>
where
    G: Graph,
{
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            values: FxHashMap::default(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_inner(self) -> G {
        self.graph
    }

    pub fn value(&self, node: &G::Node) -> Option<&V> {
        self.values.get(node)
    }

    /// Sets the value of a node. Does nothing if the node is not in the
    /// graph.
    pub fn set_value(&mut self, node: G::Node, value: V) {
        if self.graph.contains(&node) {
            self.values.insert(node, value);
        }
    }

    pub fn remove_value(&mut self, node: &G::Node) -> Option<V> {
        self.values.remove(node)
    }

    /// Iterates over the nodes that have a value, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = (&G::Node, &V)> + '_ {
        self.values.iter()
    }
}

impl<G, V> Graph for ValuedGraphWrapper<G, V>
where
    G: Graph,
{
    delegate_graph!(graph);
}

/// Graph with a value attached to its nodes and a weight attached to its
/// edges.
///
/// Weights of undirected graphs are orientation-agnostic, setting the weight
/// of `(a, b)` is visible when querying `(b, a)`. In directed graphs, `(a, b)`
/// and `(b, a)` are independent edges. Setting the weight of a pair that is
/// not an edge of the wrapped graph is silently ignored.
///
/// # Examples
///
/// ```
/// use tempograph::{adapt::WeightedValuedGraphWrapper, core::{Create, Graph}, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, [1, 2, 3], [(1, 2), (2, 3)]);
/// let mut weighted = WeightedValuedGraphWrapper::<_, (), _>::new(graph);
///
/// weighted.set_weight(1, 2, 0.5);
/// weighted.set_weight(1, 3, 9.0);
///
/// assert_eq!(weighted.weight(&2, &1), Some(&0.5));
/// assert_eq!(weighted.weight(&1, &3), None);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedValuedGraphWrapper<G, V, W>
where
    G: Graph,
{
    inner: ValuedGraphWrapper<G, V>,
    weights: FxHashMap<(G::Node, G::Node), W>,
}

impl<G, V, W> WeightedValuedGraphWrapper<G, V, W>
where
    G: Graph,
{
    pub fn new(graph: G) -> Self {
        Self {
            inner: ValuedGraphWrapper::new(graph),
            weights: FxHashMap::default(),
        }
    }

    pub fn graph(&self) -> &G {
        self.inner.graph()
    }

    pub fn into_inner(self) -> G {
        self.inner.into_inner()
    }

    pub fn value(&self, node: &G::Node) -> Option<&V> {
        self.inner.value(node)
    }

    pub fn set_value(&mut self, node: G::Node, value: V) {
        self.inner.set_value(node, value);
    }

    pub fn remove_value(&mut self, node: &G::Node) -> Option<V> {
        self.inner.remove_value(node)
    }

    pub fn weight(&self, src: &G::Node, dst: &G::Node) -> Option<&W> {
        let key = (src.clone(), dst.clone());

        match self.weights.get(&key) {
            Some(weight) => Some(weight),
            None if !self.is_directed() => self.weights.get(&(key.1, key.0)),
            None => None,
        }
    }

    /// Sets the weight of an edge. Does nothing if the edge is not in the
    /// graph.
    pub fn set_weight(&mut self, src: G::Node, dst: G::Node, weight: W) {
        if !self.inner.graph().adjacent(&src, &dst) {
            return;
        }

        if !self.is_directed() {
            self.weights.remove(&(dst.clone(), src.clone()));
        }

        self.weights.insert((src, dst), weight);
    }

    pub fn remove_weight(&mut self, src: &G::Node, dst: &G::Node) -> Option<W> {
        let key = (src.clone(), dst.clone());

        match self.weights.remove(&key) {
            Some(weight) => Some(weight),
            None if !self.is_directed() => self.weights.remove(&(key.1, key.0)),
            None => None,
        }
    }
}

impl<G, V> WeightedValuedGraphWrapper<G, V, i64>
where
    G: Graph,
{
    /// Wraps the graph and takes the weights from the edges that carry one.
    pub fn from_edges<I, E>(graph: G, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<G::Node>>,
    {
        let mut wrapper = Self::new(graph);

        for edge in edges {
            let edge = edge.into();

            if let Some(weight) = edge.weight {
                wrapper.set_weight(edge.source, edge.sink, weight);
            }
        }

        wrapper
    }
}

impl<G, V, W> Graph for WeightedValuedGraphWrapper<G, V, W>
where
    G: Graph,
{
    delegate_graph!(inner.graph);
}
