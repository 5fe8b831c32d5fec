use proptest::{collection::vec, prelude::*};

use crate::core::Create;

/// Raw construction input for a graph with nodes `0..n`.
#[derive(Debug, Clone)]
pub struct GraphInput {
    pub nodes: Vec<u32>,
    pub edges: Vec<(u32, u32)>,
}

impl GraphInput {
    pub fn build<G>(&self, directed: bool) -> G
    where
        G: Create<Node = u32>,
    {
        G::from_edges(directed, self.nodes.iter().copied(), self.edges.iter())
    }
}

/// Strategy generating graphs with `1..=max_nodes` nodes and up to `max_edges`
/// edges, including self-loops and duplicates.
pub fn graph_input(max_nodes: u32, max_edges: usize) -> impl Strategy<Value = GraphInput> {
    (1..=max_nodes).prop_flat_map(move |n| {
        let edges = vec((0..n, 0..n), 0..=max_edges);

        edges.prop_map(move |edges| GraphInput {
            nodes: (0..n).collect(),
            edges,
        })
    })
}
