use std::collections::{hash_map::Entry, VecDeque};

use rustc_hash::FxHashMap;

use crate::{
    adapt::ValuedGraphWrapper,
    core::{marker::Outgoing, Create, Graph},
    storage::SparseGraph,
};

pub(crate) struct Traversal<N> {
    /// Nodes in order of discovery, starting with the start node.
    pub order: Vec<N>,
    pub dist: FxHashMap<N, usize>,
    pub pred: FxHashMap<N, N>,
}

/// Breadth-first traversal along outgoing edges. Stops when `goal` is
/// discovered or when nodes at `radius` hops are reached.
pub(crate) fn bfs<G>(
    graph: &G,
    start: &G::Node,
    goal: Option<&G::Node>,
    radius: Option<usize>,
) -> Traversal<G::Node>
where
    G: Graph,
{
    let mut order = vec![start.clone()];
    let mut dist = FxHashMap::default();
    let mut pred = FxHashMap::default();
    let mut queue = VecDeque::new();

    dist.insert(start.clone(), 0);
    queue.push_back((start.clone(), 0));

    'search: while let Some((node, node_dist)) = queue.pop_front() {
        if goal == Some(&node) || radius == Some(node_dist) {
            continue;
        }

        for next in graph.neighbors_directed(&node, Outgoing) {
            if let Entry::Vacant(slot) = dist.entry(next.clone()) {
                slot.insert(node_dist + 1);
                pred.insert(next.clone(), node.clone());
                order.push(next.clone());

                if goal == Some(&next) {
                    break 'search;
                }

                queue.push_back((next, node_dist + 1));
            }
        }
    }

    Traversal { order, dist, pred }
}

/// Number of hops on a shortest path from `src` to `dst`, or `None` if `dst`
/// is not reachable.
///
/// The distance of a node to itself is zero.
pub fn geodesic_distance<G>(graph: &G, src: &G::Node, dst: &G::Node) -> Option<usize>
where
    G: Graph,
{
    if src == dst {
        return Some(0);
    }

    bfs(graph, src, Some(dst), None).dist.get(dst).copied()
}

/// Distances from `source` to every node reachable from it, including
/// `source` itself.
pub fn geodesic_distances<G>(graph: &G, source: &G::Node) -> FxHashMap<G::Node, usize>
where
    G: Graph,
{
    if !graph.contains(source) {
        return FxHashMap::default();
    }

    bfs(graph, source, None, None).dist
}

/// Shortest-path tree rooted at `source`.
///
/// The tree contains exactly the nodes reachable from `source` in order of
/// discovery, each valued with its distance from `source`. Every node except
/// the root has one edge from its parent. When there are multiple shortest
/// paths, the parent is the node that discovered the child first.
///
/// # Examples
///
/// ```
/// use tempograph::{algo::geodesic_tree, core::{Create, Graph}, storage::SparseGraph};
///
/// let graph = SparseGraph::from_edges(false, 0..5, [(0, 1), (0, 2), (1, 3), (2, 3)]);
/// let tree = geodesic_tree(&graph, &0);
///
/// assert_eq!(tree.order(), 4);
/// assert_eq!(tree.edge_count(), 3);
/// assert_eq!(tree.value(&3), Some(&2));
/// assert!(!tree.contains(&4));
/// ```
pub fn geodesic_tree<G>(graph: &G, source: &G::Node) -> ValuedGraphWrapper<SparseGraph<G::Node>, usize>
where
    G: Graph,
{
    let directed = graph.is_directed();

    if !graph.contains(source) {
        return ValuedGraphWrapper::new(SparseGraph::empty(directed));
    }

    let Traversal { order, dist, pred } = bfs(graph, source, None, None);

    let edges = order
        .iter()
        .filter_map(|child| pred.get(child).map(|parent| (parent.clone(), child.clone())))
        .collect::<Vec<_>>();

    let mut tree = ValuedGraphWrapper::new(SparseGraph::from_edges(directed, order, edges));

    for (node, node_dist) in dist {
        tree.set_value(node, node_dist);
    }

    tree
}
