//! Collection of simple utilities for various properties and calculations.

/// Returns the number of edges in a [complete graph] given the node count and
/// directionality. Self-loops are not counted.
///
/// [complete graph]: https://en.wikipedia.org/wiki/Complete_graph
///
/// # Examples
///
/// ```
/// use tempograph::core::facts::complete_graph_edge_count;
///
/// assert_eq!(complete_graph_edge_count(5, false), 10);
/// assert_eq!(complete_graph_edge_count(5, true), 20);
/// assert_eq!(complete_graph_edge_count(0, true), 0);
/// ```
pub fn complete_graph_edge_count(node_count: usize, directed: bool) -> usize {
    let pairs = node_count * node_count.saturating_sub(1);

    if directed {
        pairs
    } else {
        pairs / 2
    }
}

/// Returns the sum of degrees implied by the [handshaking lemma] for a graph
/// with given edge and self-loop counts, following the degree convention of
/// [`Graph::degree`](crate::core::Graph::degree).
///
/// [handshaking lemma]: https://en.wikipedia.org/wiki/Handshaking_lemma
pub fn degree_sum(edge_count: usize, self_loop_count: usize, directed: bool) -> usize {
    if directed {
        2 * edge_count
    } else {
        // Self-loop counts once in undirected graphs.
        2 * edge_count - self_loop_count
    }
}
