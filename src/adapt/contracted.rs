use std::{fmt, iter::Cloned, slice, vec};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::{marker::Direction, Graph};

/// The error encountered when creating a [`ContractedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The representative is a node of the parent that is not being
    /// contracted.
    #[error("representative already exists among the uncontracted nodes")]
    RepresentativeExists,
}

/// View of a graph where a subset of nodes is merged into one representative
/// node.
///
/// Every edge incident to a contracted node is remapped to the
/// representative. Two contracted nodes that are adjacent in the parent make
/// the representative adjacent to itself. The representative is appended
/// after the remaining parent nodes in the node order.
///
/// # Examples
///
/// ```
/// use tempograph::{adapt::ContractedGraph, core::{Create, Graph}, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, 0..4, [(0, 1), (1, 2), (2, 3)]);
/// let contracted = ContractedGraph::new(&graph, [1, 2], 100).unwrap();
///
/// assert_eq!(contracted.nodes().collect::<Vec<_>>(), vec![0, 3, 100]);
/// assert!(contracted.adjacent(&0, &100));
/// assert!(contracted.adjacent(&100, &3));
/// // Edge 1-2 became a self-loop.
/// assert!(contracted.adjacent(&100, &100));
/// ```
pub struct ContractedGraph<'a, G>
where
    G: Graph,
{
    graph: &'a G,
    contracted: FxHashSet<G::Node>,
    representative: G::Node,
    nodes: Vec<G::Node>,
}

impl<'a, G> ContractedGraph<'a, G>
where
    G: Graph,
{
    pub fn new<S>(graph: &'a G, subset: S, representative: G::Node) -> Result<Self, ContractError>
    where
        S: IntoIterator<Item = G::Node>,
    {
        let contracted = subset
            .into_iter()
            .filter(|node| graph.contains(node))
            .collect::<FxHashSet<_>>();

        if graph.contains(&representative) && !contracted.contains(&representative) {
            return Err(ContractError::RepresentativeExists);
        }

        let nodes = graph
            .nodes()
            .filter(|node| !contracted.contains(node))
            .chain(std::iter::once(representative.clone()))
            .collect();

        Ok(Self {
            graph,
            contracted,
            representative,
            nodes,
        })
    }

    pub fn parent(&self) -> &'a G {
        self.graph
    }

    pub fn representative(&self) -> &G::Node {
        &self.representative
    }

    /// Maps a parent node to its node in the contracted graph.
    pub fn map(&self, node: G::Node) -> G::Node {
        if self.contracted.contains(&node) {
            self.representative.clone()
        } else {
            node
        }
    }

    /// Parent nodes that a node of the contracted graph stands for.
    fn expand<'n>(&'n self, node: &'n G::Node) -> Vec<&'n G::Node> {
        if *node == self.representative {
            self.contracted.iter().collect()
        } else if self.contains(node) {
            vec![node]
        } else {
            Vec::new()
        }
    }

    fn collect_mapped<F, I>(&self, node: &G::Node, neighbors: F) -> vec::IntoIter<G::Node>
    where
        F: Fn(&G::Node) -> I,
        I: Iterator<Item = G::Node>,
    {
        let mut seen = FxHashSet::default();
        let mut mapped = Vec::new();

        for original in self.expand(node) {
            for neighbor in neighbors(original) {
                let neighbor = self.map(neighbor);

                if seen.insert(neighbor.clone()) {
                    mapped.push(neighbor);
                }
            }
        }

        mapped.into_iter()
    }
}

impl<G> fmt::Debug for ContractedGraph<'_, G>
where
    G: Graph + fmt::Debug,
    G::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractedGraph")
            .field("graph", &self.graph)
            .field("contracted", &self.contracted)
            .field("representative", &self.representative)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<G> Graph for ContractedGraph<'_, G>
where
    G: Graph,
{
    type Node = G::Node;

    type NodesIter<'b> = Cloned<slice::Iter<'b, G::Node>>
    where
        Self: 'b;

    type NeighborsIter<'b> = vec::IntoIter<G::Node>
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
        *node == self.representative
            || (!self.contracted.contains(node) && self.graph.contains(node))
    }

    fn adjacent(&self, src: &G::Node, dst: &G::Node) -> bool {
        let dsts = self.expand(dst);

        self.expand(src)
            .into_iter()
            .any(|src| dsts.iter().any(|dst| self.graph.adjacent(src, dst)))
    }

    fn neighbors(&self, node: &G::Node) -> Self::NeighborsIter<'_> {
        self.collect_mapped(node, |original| self.graph.neighbors(original))
    }

    fn neighbors_directed(&self, node: &G::Node, dir: Direction) -> Self::NeighborsIter<'_> {
        self.collect_mapped(node, |original| {
            self.graph.neighbors_directed(original, dir)
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        core::{marker::Direction, Create},
        infra::testing::check_consistency,
        storage::{MatrixGraph, SparseGraph},
    };

    fn square() -> SparseGraph<u32> {
        SparseGraph::from_edges(false, 0..4, [(0u32, 1u32), (1, 2), (2, 3), (3, 0)])
    }

    #[test]
    fn contraction_remaps_edges() {
        let graph = square();
        let contracted = ContractedGraph::new(&graph, [0, 1], 10).unwrap();

        assert_eq!(contracted.nodes().collect::<Vec<_>>(), vec![2, 3, 10]);
        assert!(contracted.adjacent(&10, &2));
        assert!(contracted.adjacent(&3, &10));
        assert!(contracted.adjacent(&10, &10));
        assert!(!contracted.contains(&0));
        assert!(!contracted.adjacent(&0, &3));

        // Neighbors are deduplicated after remapping.
        let mut neighbors = contracted.neighbors(&10).collect::<Vec<_>>();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![2, 3, 10]);

        // 10-10, 10-2, 2-3, 3-10
        assert_eq!(contracted.edge_count(), 4);
        check_consistency(&contracted).unwrap();
    }

    #[test]
    fn no_self_loop_without_internal_edge() {
        let graph = square();
        let contracted = ContractedGraph::new(&graph, [0, 2], 10).unwrap();

        assert!(!contracted.adjacent(&10, &10));
        assert_eq!(contracted.degree(&10), 2);
        check_consistency(&contracted).unwrap();
    }

    #[test]
    fn representative_may_reuse_contracted_node() {
        let graph = square();
        let contracted = ContractedGraph::new(&graph, [0, 1], 0).unwrap();

        assert_eq!(contracted.nodes().collect::<Vec<_>>(), vec![2, 3, 0]);
        assert!(contracted.adjacent(&0, &2));
    }

    #[test]
    fn representative_collision() {
        let graph = square();

        assert_matches!(
            ContractedGraph::new(&graph, [0, 1], 3),
            Err(ContractError::RepresentativeExists)
        );
    }

    #[test]
    fn directed_contraction() {
        let graph = MatrixGraph::<u32>::from_edges(true, 0..3, [(0u32, 1u32), (2, 0)]);
        let contracted = ContractedGraph::new(&graph, [0, 1], 9).unwrap();

        assert!(contracted.adjacent(&9, &9));
        assert!(contracted.adjacent(&2, &9));
        assert!(!contracted.adjacent(&9, &2));
        assert_eq!(contracted.degree_directed(&9, Direction::Incoming), 2);
        assert_eq!(contracted.degree_directed(&9, Direction::Outgoing), 1);
        check_consistency(&contracted).unwrap();
    }
}
