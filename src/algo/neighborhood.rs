use rustc_hash::FxHashSet;

use crate::core::Graph;

use super::geodesic::bfs;

/// All nodes within `radius` hops from `start`, following outgoing edges.
///
/// The result always contains `start`, even if it is not in the graph.
pub fn neighborhood<G>(graph: &G, start: &G::Node, radius: usize) -> FxHashSet<G::Node>
where
    G: Graph,
{
    bfs(graph, start, None, Some(radius)).dist.into_keys().collect()
}
