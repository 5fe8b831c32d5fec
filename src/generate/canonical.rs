use crate::core::Create;

/// Graph with `n` nodes and no edges.
pub fn empty_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    G::from_nodes(directed, 0..n)
}

/// Graph with an edge between every two distinct nodes. A directed complete
/// graph has edges in both directions.
pub fn complete_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    let edges = (0..n).flat_map(|i| {
        let others = if directed { 0..n } else { (i + 1)..n };
        others.filter(move |&j| j != i).map(move |j| (i, j))
    });

    G::from_edges(directed, 0..n, edges)
}

/// Graph with edges `i → (i + 1) mod n`.
///
/// A cycle of one node would be a self-loop, which is left out.
pub fn cycle_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    let edges = (0..n)
        .map(|i| (i, (i + 1) % n))
        .filter(|(i, j)| i != j);

    G::from_edges(directed, 0..n, edges)
}

/// Graph with edges `i → i + 1`.
pub fn path_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    G::from_edges(directed, 0..n, (1..n).map(|i| (i - 1, i)))
}

/// Graph with hub `0` and edges from the hub to every other node.
pub fn star_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    G::from_edges(directed, 0..n, (1..n).map(|i| (0, i)))
}

/// Star graph with hub `0` and a cycle on the remaining nodes `1..n`.
pub fn wheel_graph<G>(n: usize, directed: bool) -> G
where
    G: Create<Node = usize>,
{
    let spokes = (1..n).map(|i| (0, i));
    let rim = (1..n)
        .map(|i| (i, if i + 1 < n { i + 1 } else { 1 }))
        .filter(|(i, j)| i != j);

    G::from_edges(directed, 0..n, spokes.chain(rim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algo::{adjacency_matrix, degrees},
        core::{facts::complete_graph_edge_count, Graph},
        infra::testing::check_consistency,
        storage::{MatrixGraph, SparseGraph},
    };

    #[test]
    fn empty() {
        let graph: SparseGraph<usize> = empty_graph(4, true);

        assert_eq!(graph.order(), 4);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn complete() {
        for directed in [false, true] {
            for n in 0..6 {
                let graph: MatrixGraph<usize> = complete_graph(n, directed);

                check_consistency(&graph).unwrap();
                assert_eq!(graph.edge_count(), complete_graph_edge_count(n, directed));
                assert!(graph.nodes().all(|node| !graph.adjacent(&node, &node)));
            }
        }
    }

    #[test]
    fn cycle_matrix() {
        let graph: SparseGraph<usize> = cycle_graph(4, false);

        assert_eq!(
            adjacency_matrix(&graph),
            vec![
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn directed_cycle_goes_one_way() {
        let graph: SparseGraph<usize> = cycle_graph(3, true);

        assert!(graph.adjacent(&2, &0));
        assert!(!graph.adjacent(&0, &2));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn degenerate_cycles() {
        let single: SparseGraph<usize> = cycle_graph(1, false);
        assert_eq!(single.edge_count(), 0);

        let pair: SparseGraph<usize> = cycle_graph(2, false);
        assert_eq!(pair.edge_count(), 1);
    }

    #[test]
    fn path() {
        let graph: SparseGraph<usize> = path_graph(4, false);

        check_consistency(&graph).unwrap();
        assert_eq!(degrees(&graph), vec![1, 2, 2, 1]);
    }

    #[test]
    fn star() {
        let graph: SparseGraph<usize> = star_graph(5, true);

        assert_eq!(degrees(&graph), vec![4, 1, 1, 1, 1]);
        assert!(graph.adjacent(&0, &3));
        assert!(!graph.adjacent(&3, &0));
    }

    #[test]
    fn wheel_matrix() {
        let graph: MatrixGraph<usize> = wheel_graph(5, false);

        assert_eq!(
            adjacency_matrix(&graph),
            vec![
                vec![0, 1, 1, 1, 1],
                vec![1, 0, 1, 0, 1],
                vec![1, 1, 0, 1, 0],
                vec![1, 0, 1, 0, 1],
                vec![1, 1, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn small_wheels() {
        let two: SparseGraph<usize> = wheel_graph(2, false);
        assert_eq!(two.edge_count(), 1);

        let three: SparseGraph<usize> = wheel_graph(3, false);
        assert_eq!(three.edge_count(), 3);
    }
}
