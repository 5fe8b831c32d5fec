use super::{edge::Edge, graph::Graph};

/// Construction of a graph representation from a node list and an edge list.
///
/// Representations are built once and are immutable afterwards. The contract
/// of the input is shared by all implementors:
///
/// * Duplicate nodes keep their first occurrence, which determines the node
///   order.
/// * An edge endpoint that is missing from the node list is appended to the
///   node order, in order of appearance.
/// * Duplicate edges collapse into one. In undirected graphs, `(a, b)` and
///   `(b, a)` are duplicates.
pub trait Create: Graph + Sized {
    fn from_edges<I, E, V>(directed: bool, nodes: V, edges: I) -> Self
    where
        V: IntoIterator<Item = Self::Node>,
        I: IntoIterator<Item = E>,
        E: Into<Edge<Self::Node>>;

    fn empty(directed: bool) -> Self {
        Self::from_edges(
            directed,
            std::iter::empty(),
            std::iter::empty::<Edge<Self::Node>>(),
        )
    }

    fn from_nodes<V>(directed: bool, nodes: V) -> Self
    where
        V: IntoIterator<Item = Self::Node>,
    {
        Self::from_edges(directed, nodes, std::iter::empty::<Edge<Self::Node>>())
    }
}
