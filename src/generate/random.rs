use fastrand::Rng;
use rustc_hash::FxHashSet;

use crate::core::{facts::complete_graph_edge_count, matrix, Create};

use super::Error;

/// Erdős–Rényi graph where every pair of distinct nodes is connected
/// independently with probability `p`.
///
/// In directed graphs, `(i, j)` and `(j, i)` are independent pairs.
pub fn random_graph<G>(n: usize, p: f64, directed: bool, rng: &mut Rng) -> Result<G, Error>
where
    G: Create<Node = usize>,
{
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidProbability(p));
    }

    let mut edges = Vec::new();

    for i in 0..n {
        let others = if directed { 0..n } else { (i + 1)..n };

        for j in others {
            if i != j && rng.f64() < p {
                edges.push((i, j));
            }
        }
    }

    Ok(G::from_edges(directed, 0..n, edges))
}

/// Erdős–Rényi graph with exactly `m` edges sampled uniformly without
/// replacement from all pairs of distinct nodes.
///
/// # Examples
///
/// ```
/// use tempograph::{core::Graph, generate::{self, random_graph_with_edges}, storage::SparseGraph};
///
/// let mut rng = fastrand::Rng::with_seed(3);
///
/// let graph: SparseGraph<usize> = random_graph_with_edges(6, 15, false, &mut rng).unwrap();
/// assert_eq!(graph.edge_count(), 15);
///
/// let result = random_graph_with_edges::<SparseGraph<usize>>(6, 16, false, &mut rng);
/// assert_eq!(result.unwrap_err(), generate::Error::TooManyEdges { requested: 16, max: 15 });
/// ```
pub fn random_graph_with_edges<G>(
    n: usize,
    m: usize,
    directed: bool,
    rng: &mut Rng,
) -> Result<G, Error>
where
    G: Create<Node = usize>,
{
    let max = complete_graph_edge_count(n, directed);

    if m > max {
        return Err(Error::TooManyEdges { requested: m, max });
    }

    // Floyd's sampling of m distinct indices from 0..max.
    let mut chosen = FxHashSet::default();
    let mut order = Vec::with_capacity(m);

    for j in (max - m)..max {
        let t = rng.usize(0..=j);
        let index = if chosen.insert(t) {
            t
        } else {
            chosen.insert(j);
            j
        };
        order.push(index);
    }

    let edges = order.into_iter().map(|index| pair(directed, index, n));

    Ok(G::from_edges(directed, 0..n, edges))
}

/// Decodes the index of a pair of distinct nodes.
fn pair(directed: bool, index: usize, n: usize) -> (usize, usize) {
    if directed {
        // Rows of n - 1 cells, skipping the diagonal.
        let row = index / (n - 1);
        let col = index % (n - 1);
        (row, if col >= row { col + 1 } else { col })
    } else {
        // Strict lower triangle of n nodes is the full lower triangle of
        // n - 1 nodes shifted by one row.
        let (row, col) = matrix::coords(false, index, n - 1);
        (row + 1, col)
    }
}
