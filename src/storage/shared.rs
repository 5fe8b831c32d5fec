use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::core::Edge;

/// Construction input resolved to node positions.
pub struct Indexed<N> {
    pub nodes: Vec<N>,
    pub indices: FxHashMap<N, usize>,
    pub edges: Vec<(usize, usize)>,
}

pub fn index_input<N, V, I, E>(nodes: V, edges: I) -> Indexed<N>
where
    N: Clone + Eq + Hash,
    V: IntoIterator<Item = N>,
    I: IntoIterator<Item = E>,
    E: Into<Edge<N>>,
{
    let mut indexed = Indexed {
        nodes: Vec::new(),
        indices: FxHashMap::default(),
        edges: Vec::new(),
    };

    for node in nodes {
        indexed.insert(node);
    }

    for edge in edges {
        let edge = edge.into();
        let src = indexed.insert(edge.source);
        let dst = indexed.insert(edge.sink);
        indexed.edges.push((src, dst));
    }

    indexed
}

impl<N: Clone + Eq + Hash> Indexed<N> {
    fn insert(&mut self, node: N) -> usize {
        if let Some(index) = self.indices.get(&node) {
            return *index;
        }

        let index = self.nodes.len();
        self.indices.insert(node.clone(), index);
        self.nodes.push(node);
        index
    }
}
