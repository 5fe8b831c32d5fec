use std::fmt;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::{
    facts,
    marker::{Direction, Incoming, Outgoing},
    Graph,
};

fn degree_dir(dir: Direction) -> &'static str {
    match dir {
        Direction::Outgoing => "out",
        Direction::Incoming => "in",
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("nodes iterator count ({0}) is not equal to order ({1})")]
    NodesOrderMismatch(usize, usize),
    #[error("nodes iterator yields a duplicate node")]
    DuplicateNode,
    #[error("node {0} (zero-based) is yielded but not contained")]
    NodeNotContained(usize),
    #[error("edges iterator count ({0}) is not equal to edge count ({1})")]
    EdgesEdgeCountMismatch(usize, usize),
    #[error("edge {0} (zero-based) is enumerated but its endpoints are not adjacent")]
    EdgeNotAdjacent(usize),
    #[error("neighbor of node {0} (zero-based) is not adjacent")]
    NeighborNotAdjacent(usize),
    #[error("adjacency is not symmetric in an undirected graph at node {0} (zero-based)")]
    AsymmetricAdjacency(usize),
    #[error("degree of node {0} (zero-based) is not equal to its neighbor count")]
    DegreeNeighborsMismatch(usize),
    #[error("sum of degrees ({0}) is not equal to the expected sum ({1})")]
    HandshakingLemma(usize, usize),
    #[error("sum of {} degrees ({0}) is not equal to edge count ({1})", degree_dir(*.2))]
    HandshakingLemmaDirected(usize, usize, Direction),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyMismatch {
    #[error("node sequences differ")]
    Nodes,
    #[error("directedness differs")]
    Directedness,
    #[error("edge counts differ ({0} vs {1})")]
    EdgeCount(usize, usize),
    #[error("adjacency differs at node pair ({0}, {1}) (zero-based)")]
    Adjacent(usize, usize),
    #[error("degree differs at node {0} (zero-based)")]
    Degree(usize),
    #[error("neighbors differ at node {0} (zero-based)")]
    Neighbors(usize),
}

pub fn check_consistency<G>(graph: &G) -> Result<(), ConsistencyCheckError>
where
    G: Graph,
{
    let nodes = graph.nodes().collect::<Vec<_>>();

    if nodes.len() != graph.order() {
        return Err(ConsistencyCheckError::NodesOrderMismatch(
            nodes.len(),
            graph.order(),
        ));
    }

    if nodes.iter().collect::<FxHashSet<_>>().len() != nodes.len() {
        return Err(ConsistencyCheckError::DuplicateNode);
    }

    if let Some(i) = nodes.iter().position(|node| !graph.contains(node)) {
        return Err(ConsistencyCheckError::NodeNotContained(i));
    }

    let edges = graph.edges();
    let edge_count = graph.edge_count();

    if edges.len() != edge_count {
        return Err(ConsistencyCheckError::EdgesEdgeCountMismatch(
            edges.len(),
            edge_count,
        ));
    }

    if let Some(i) = edges.iter().position(|(src, dst)| !graph.adjacent(src, dst)) {
        return Err(ConsistencyCheckError::EdgeNotAdjacent(i));
    }

    for (i, node) in nodes.iter().enumerate() {
        let all_adjacent = graph
            .neighbors_directed(node, Outgoing)
            .all(|other| graph.adjacent(node, &other));

        if !all_adjacent {
            return Err(ConsistencyCheckError::NeighborNotAdjacent(i));
        }

        if !graph.is_directed() {
            let symmetric = graph
                .neighbors(node)
                .all(|other| graph.adjacent(&other, node));

            if !symmetric {
                return Err(ConsistencyCheckError::AsymmetricAdjacency(i));
            }

            if graph.degree(node) != graph.neighbors(node).count() {
                return Err(ConsistencyCheckError::DegreeNeighborsMismatch(i));
            }
        }
    }

    let self_loops = edges.iter().filter(|(src, dst)| src == dst).count();
    let deg_sum = nodes.iter().map(|node| graph.degree(node)).sum::<usize>();

    if graph.is_directed() {
        for dir in [Outgoing, Incoming] {
            let dir_sum = nodes
                .iter()
                .map(|node| graph.degree_directed(node, dir))
                .sum::<usize>();

            // https://en.wikipedia.org/wiki/Handshaking_lemma
            if dir_sum != edge_count {
                return Err(ConsistencyCheckError::HandshakingLemmaDirected(
                    dir_sum, edge_count, dir,
                ));
            }
        }
    }

    let expected = facts::degree_sum(edge_count, self_loops, graph.is_directed());

    if deg_sum != expected {
        return Err(ConsistencyCheckError::HandshakingLemma(deg_sum, expected));
    }

    Ok(())
}

/// Checks that two graphs over the same node sequence answer all queries of
/// the graph contract identically.
pub fn check_same_topology<G1, G2>(lhs: &G1, rhs: &G2) -> Result<(), TopologyMismatch>
where
    G1: Graph,
    G2: Graph<Node = G1::Node>,
{
    let nodes = lhs.nodes().collect::<Vec<_>>();

    if nodes != rhs.nodes().collect::<Vec<_>>() {
        return Err(TopologyMismatch::Nodes);
    }

    if lhs.is_directed() != rhs.is_directed() {
        return Err(TopologyMismatch::Directedness);
    }

    if lhs.edge_count() != rhs.edge_count() {
        return Err(TopologyMismatch::EdgeCount(lhs.edge_count(), rhs.edge_count()));
    }

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate() {
            if lhs.adjacent(a, b) != rhs.adjacent(a, b) {
                return Err(TopologyMismatch::Adjacent(i, j));
            }
        }

        if lhs.degree(a) != rhs.degree(a) {
            return Err(TopologyMismatch::Degree(i));
        }

        for dir in [Outgoing, Incoming] {
            if lhs.degree_directed(a, dir) != rhs.degree_directed(a, dir) {
                return Err(TopologyMismatch::Degree(i));
            }

            let lhs_neighbors = lhs.neighbors_directed(a, dir).collect::<FxHashSet<_>>();
            let rhs_neighbors = rhs.neighbors_directed(a, dir).collect::<FxHashSet<_>>();

            if lhs_neighbors != rhs_neighbors {
                return Err(TopologyMismatch::Neighbors(i));
            }
        }

        let lhs_neighbors = lhs.neighbors(a).collect::<FxHashSet<_>>();
        let rhs_neighbors = rhs.neighbors(a).collect::<FxHashSet<_>>();

        if lhs_neighbors != rhs_neighbors {
            return Err(TopologyMismatch::Neighbors(i));
        }
    }

    Ok(())
}

/// Formats a graph as a list of nodes and edges, handy in assertion messages.
pub struct AsEdgeList<'a, G>(pub &'a G);

impl<G> fmt::Debug for AsEdgeList<'_, G>
where
    G: Graph,
    G::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &self.0.is_directed())
            .field("nodes", &self.0.nodes().collect::<Vec<_>>())
            .field("edges", &self.0.edges())
            .finish()
    }
}
