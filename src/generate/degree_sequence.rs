use fastrand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::Create;

use super::Error;

/// Attempts to draw an acceptable partner for a stub before falling back to
/// an edge swap.
const MAX_REDRAWS: usize = 32;

/// Attempts to find an existing edge that can be swapped to accommodate a
/// pair of stubs.
const MAX_SWAPS: usize = 64;

/// Simple graph being built from stubs.
struct Matching {
    directed: bool,
    edges: Vec<(usize, usize)>,
    present: FxHashSet<(usize, usize)>,
}

impl Matching {
    fn new(directed: bool) -> Self {
        Self {
            directed,
            edges: Vec::new(),
            present: FxHashSet::default(),
        }
    }

    fn key(&self, src: usize, dst: usize) -> (usize, usize) {
        if self.directed || src <= dst {
            (src, dst)
        } else {
            (dst, src)
        }
    }

    fn accepts(&self, src: usize, dst: usize) -> bool {
        src != dst && !self.present.contains(&self.key(src, dst))
    }

    fn add(&mut self, src: usize, dst: usize) {
        self.present.insert(self.key(src, dst));
        self.edges.push((src, dst));
    }

    /// Replaces an existing edge `(x, y)` with two edges that contain `src`
    /// and `dst` while keeping the degrees of `x` and `y`.
    fn rewire(&mut self, src: usize, dst: usize, rng: &mut Rng) -> bool {
        for _ in 0..MAX_SWAPS {
            if self.edges.is_empty() {
                return false;
            }

            let i = rng.usize(..self.edges.len());
            let (x, y) = self.edges[i];

            let (first, second) = if self.directed {
                // x keeps its out-degree, y keeps its in-degree.
                ((src, y), (x, dst))
            } else if rng.bool() {
                ((src, x), (dst, y))
            } else {
                ((src, y), (dst, x))
            };

            let feasible = self.accepts(first.0, first.1)
                && self.accepts(second.0, second.1)
                && self.key(first.0, first.1) != self.key(second.0, second.1);

            if feasible {
                let removed = self.edges.swap_remove(i);
                self.present.remove(&self.key(removed.0, removed.1));
                self.add(first.0, first.1);
                self.add(second.0, second.1);
                return true;
            }
        }

        false
    }

    /// Pairs `src` with one of `candidates`, removing the chosen candidate.
    fn pair(&mut self, src: usize, candidates: &mut Vec<usize>, rng: &mut Rng) {
        if candidates.is_empty() {
            return;
        }

        for _ in 0..MAX_REDRAWS {
            let j = rng.usize(..candidates.len());

            if self.accepts(src, candidates[j]) {
                let dst = candidates.swap_remove(j);
                self.add(src, dst);
                return;
            }
        }

        let j = rng.usize(..candidates.len());
        let dst = candidates.swap_remove(j);

        if !self.rewire(src, dst, rng) {
            debug!(src, dst, "dropping stub pair that cannot be matched");
        }
    }
}

fn stubs(degrees: &[usize]) -> Vec<usize> {
    degrees
        .iter()
        .enumerate()
        .flat_map(|(node, &degree)| std::iter::repeat(node).take(degree))
        .collect()
}

/// Undirected simple graph with the given degree sequence, built by random
/// stub matching.
///
/// A stub that cannot be matched without creating a self-loop or a parallel
/// edge is redrawn, then an existing edge is swapped to accommodate it. If
/// that fails too, the pair of stubs is dropped, so the realized degrees may
/// fall short of the sequence for sequences that are hard or impossible to
/// realize.
///
/// # Examples
///
/// ```
/// use tempograph::{algo, generate::configuration_model, storage::SparseGraph};
///
/// let mut rng = fastrand::Rng::with_seed(5);
/// let graph: SparseGraph<usize> = configuration_model(&[1, 2, 2, 1], &mut rng).unwrap();
///
/// assert_eq!(algo::degrees(&graph), vec![1, 2, 2, 1]);
/// ```
pub fn configuration_model<G>(degrees: &[usize], rng: &mut Rng) -> Result<G, Error>
where
    G: Create<Node = usize>,
{
    if degrees.iter().sum::<usize>() % 2 != 0 {
        return Err(Error::OddDegreeSum);
    }

    let mut stubs = stubs(degrees);
    rng.shuffle(&mut stubs);

    let mut matching = Matching::new(false);

    while let Some(src) = stubs.pop() {
        matching.pair(src, &mut stubs, rng);
    }

    Ok(G::from_edges(false, 0..degrees.len(), matching.edges))
}

/// Directed simple graph with the given out-degree and in-degree sequences,
/// built by random stub matching.
///
/// Unmatchable stubs are handled the same way as in
/// [`configuration_model`].
pub fn directed_configuration_model<G>(
    out_degrees: &[usize],
    in_degrees: &[usize],
    rng: &mut Rng,
) -> Result<G, Error>
where
    G: Create<Node = usize>,
{
    if out_degrees.len() != in_degrees.len() {
        return Err(Error::LengthMismatch {
            out_len: out_degrees.len(),
            in_len: in_degrees.len(),
        });
    }

    let out_sum = out_degrees.iter().sum::<usize>();
    let in_sum = in_degrees.iter().sum::<usize>();

    if out_sum != in_sum {
        return Err(Error::DegreeSumMismatch { out_sum, in_sum });
    }

    let mut sources = stubs(out_degrees);
    let mut sinks = stubs(in_degrees);
    rng.shuffle(&mut sources);

    let mut matching = Matching::new(true);

    for src in sources {
        matching.pair(src, &mut sinks, rng);
    }

    Ok(G::from_edges(true, 0..out_degrees.len(), matching.edges))
}
