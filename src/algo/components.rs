use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

use crate::{adapt::Subgraph, core::Graph};

use super::Error;

fn partition<G>(graph: &G) -> Result<Vec<Vec<G::Node>>, Error>
where
    G: Graph,
{
    if graph.is_directed() {
        return Err(Error::DirectedGraph);
    }

    let nodes = graph.nodes().collect::<Vec<_>>();
    let indices = nodes
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, node)| (node, i))
        .collect::<FxHashMap<_, _>>();

    let mut visited = FixedBitSet::with_capacity(nodes.len());
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..nodes.len() {
        if visited.put(start) {
            continue;
        }

        let mut members = vec![start];
        queue.push_back(start);

        while let Some(i) = queue.pop_front() {
            for neighbor in graph.neighbors(&nodes[i]) {
                if let Some(&j) = indices.get(&neighbor) {
                    if !visited.put(j) {
                        members.push(j);
                        queue.push_back(j);
                    }
                }
            }
        }

        members.sort_unstable();
        components.push(members.into_iter().map(|i| nodes[i].clone()).collect());
    }

    Ok(components)
}

/// Connected components of an undirected graph.
///
/// Every node belongs to exactly one component. Components are ordered by
/// their first node and their members follow the node order.
///
/// # Examples
///
/// ```
/// use tempograph::{algo::{self, components}, core::Create, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, [1, 2, 3, 4], [(1, 3), (4, 4)]);
/// assert_eq!(components(&graph), Ok(vec![vec![1, 3], vec![2], vec![4]]));
///
/// let directed = SparseGraph::from_edges(true, [1, 2], [(1, 2)]);
/// assert_eq!(components(&directed), Err(algo::Error::DirectedGraph));
/// ```
pub fn components<G>(graph: &G) -> Result<Vec<Vec<G::Node>>, Error>
where
    G: Graph,
{
    partition(graph)
}

/// Component of an undirected graph that contains `node`, in node order. The
/// component of a node that is not in the graph is empty.
pub fn component<G>(graph: &G, node: &G::Node) -> Result<Vec<G::Node>, Error>
where
    G: Graph,
{
    let components = partition(graph)?;

    Ok(components
        .into_iter()
        .find(|component| component.contains(node))
        .unwrap_or_default())
}

/// Connected components of an undirected graph as subgraphs of it.
pub fn component_graphs<G>(graph: &G) -> Result<Vec<Subgraph<'_, G>>, Error>
where
    G: Graph,
{
    let components = partition(graph)?;

    Ok(components
        .into_iter()
        .map(|component| Subgraph::new(graph, component))
        .collect())
}

/// Returns true if the undirected graph has at most one component.
pub fn is_connected<G>(graph: &G) -> Result<bool, Error>
where
    G: Graph,
{
    partition(graph).map(|components| components.len() <= 1)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use petgraph::graph::{NodeIndex, UnGraph};
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::{
        algo::tests::three_components,
        core::Create,
        infra::{proptest::graph_input, testing::check_consistency},
        storage::{MatrixGraph, SparseGraph},
    };

    #[test]
    fn components_fixture() {
        let graph = three_components::<SparseGraph<u32>>();
        let components = components(&graph).unwrap();

        assert_eq!(
            components.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![8, 1, 2]
        );
        assert_eq!(components[0], vec![1, 2, 3, 4, 5, 6, 10, 11]);
        assert_eq!(components[2], vec![20, 21]);
    }

    #[test]
    fn component_of_node() {
        let graph = three_components::<MatrixGraph<u32>>();

        assert_eq!(component(&graph, &21), Ok(vec![20, 21]));
        assert_eq!(component(&graph, &15), Ok(vec![15]));
        assert_eq!(component(&graph, &99), Ok(vec![]));
    }

    #[test]
    fn component_graphs_fixture() {
        let graph = three_components::<SparseGraph<u32>>();
        let graphs = component_graphs(&graph).unwrap();

        assert_eq!(graphs.len(), 3);
        assert_eq!(graphs[0].edge_count(), 9);
        assert_eq!(graphs[1].edge_count(), 1);
        assert_eq!(graphs[2].edge_count(), 1);

        for sub in &graphs {
            check_consistency(sub).unwrap();
        }
    }

    #[test]
    fn connectivity() {
        let graph = three_components::<SparseGraph<u32>>();
        assert_eq!(is_connected(&graph), Ok(false));

        let graph = SparseGraph::<u32>::from_edges(false, 0..3, [(0u32, 1u32), (2, 1)]);
        assert_eq!(is_connected(&graph), Ok(true));

        let graph = SparseGraph::<u32>::empty(false);
        assert_eq!(is_connected(&graph), Ok(true));
    }

    #[test]
    fn directed_graph_is_rejected() {
        let graph = SparseGraph::<u32>::from_edges(true, 0..2, [(0u32, 1u32)]);

        assert_matches!(components(&graph), Err(Error::DirectedGraph));
        assert_matches!(component(&graph, &0), Err(Error::DirectedGraph));
        assert_matches!(component_graphs(&graph), Err(Error::DirectedGraph));
        assert_matches!(is_connected(&graph), Err(Error::DirectedGraph));
    }

    proptest! {
        #[test]
        fn components_partition_nodes(input in graph_input(16, 20)) {
            let graph: SparseGraph<u32> = input.build(false);
            let components = components(&graph).unwrap();

            let mut seen = FxHashSet::default();
            for node in components.iter().flatten() {
                prop_assert!(seen.insert(*node));
            }

            prop_assert_eq!(seen.len(), graph.order());
        }

        #[test]
        fn component_count_agrees_with_petgraph(input in graph_input(16, 20)) {
            let graph: SparseGraph<u32> = input.build(false);

            let mut reference = UnGraph::<(), ()>::new_undirected();
            for _ in &input.nodes {
                reference.add_node(());
            }
            for &(a, b) in &input.edges {
                reference.add_edge(NodeIndex::new(a as usize), NodeIndex::new(b as usize), ());
            }

            prop_assert_eq!(
                components(&graph).unwrap().len(),
                petgraph::algo::connected_components(&reference)
            );
        }
    }
}
