#![allow(dead_code)]

use fastrand::Rng;
use tempograph::{
    core::{Create, Graph},
    generate::{random_graph_with_edges, PreferentialAttachment},
    storage::SparseGraph,
    time::SlicedGraph,
};

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

pub fn random_sparse(node_count: usize, edge_count: usize, rng: &mut Rng) -> SparseGraph<usize> {
    let max = tempograph::core::facts::complete_graph_edge_count(node_count, false);
    random_graph_with_edges(node_count, edge_count.min(max), false, rng).unwrap()
}

pub fn grown_history(steps: usize, rng: &mut Rng) -> SlicedGraph<usize> {
    let seed = SparseGraph::from_edges(true, 0..4, [(0usize, 1usize), (1, 2), (2, 3), (3, 0)]);

    PreferentialAttachment::on(&seed)
        .edges_per_step(2)
        .grow_longitudinal(steps, rng)
        .unwrap()
}

pub fn petgraph_copy<G>(graph: &G) -> petgraph::graph::UnGraph<(), ()>
where
    G: Graph<Node = usize>,
{
    let mut copy = petgraph::graph::UnGraph::new_undirected();

    for _ in 0..graph.order() {
        copy.add_node(());
    }

    for (src, dst) in graph.edges() {
        copy.add_edge(
            petgraph::graph::NodeIndex::new(src),
            petgraph::graph::NodeIndex::new(dst),
            (),
        );
    }

    copy
}
