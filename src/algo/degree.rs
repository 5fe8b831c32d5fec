use crate::core::Graph;

/// Degrees of all nodes in node order.
pub fn degrees<G>(graph: &G) -> Vec<usize>
where
    G: Graph,
{
    graph.nodes().map(|node| graph.degree(&node)).collect()
}

/// Number of nodes of each degree, indexed by the degree.
///
/// The length is the maximum degree plus one. The distribution of a graph
/// without nodes is empty.
pub fn degree_distribution<G>(graph: &G) -> Vec<usize>
where
    G: Graph,
{
    let mut distribution = Vec::new();

    for degree in degrees(graph) {
        if degree >= distribution.len() {
            distribution.resize(degree + 1, 0);
        }

        distribution[degree] += 1;
    }

    distribution
}
