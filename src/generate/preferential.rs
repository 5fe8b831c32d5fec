use fastrand::Rng;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{
    core::{Create, Graph},
    storage::SparseGraph,
    time::{Interval, IntervalGraph, SlicedGraph},
};

use super::Error;

/// Attempts to draw a distinct target from the degree urn before falling
/// back to a uniform choice.
const MAX_DRAWS_PER_TARGET: usize = 32;

#[derive(Debug, Clone)]
enum EdgeCount {
    Fixed(usize),
    Distribution(Vec<f64>),
}

/// Preferential attachment growth in the manner of Barabási and Albert.
///
/// Every growth step adds one new node and connects it with edges from the
/// new node to existing nodes. Targets are chosen without repetition with
/// probability proportional to their current degree. The number of edges per
/// step is either fixed or drawn from a distribution where the `i`-th entry is
/// the (unnormalized) probability of `i` edges.
///
/// The seed graph must be directed and non-empty. Its nodes are kept and the
/// new nodes are numbered consecutively after the largest seed node.
///
/// # Examples
///
/// ```
/// use tempograph::{
///     core::{Create, Graph},
///     generate::PreferentialAttachment,
///     storage::SparseGraph,
///     time::LongitudinalGraph,
/// };
///
/// let seed = SparseGraph::from_edges(true, 0..3, [(0, 1), (1, 2)]);
/// let mut rng = fastrand::Rng::with_seed(1);
///
/// let grown: SparseGraph<usize> = PreferentialAttachment::on(&seed)
///     .edges_per_step(2)
///     .grow(10, &mut rng)
///     .unwrap();
///
/// assert_eq!(grown.order(), 13);
/// assert_eq!(grown.edge_count(), 2 + 2 * 10);
///
/// let history = PreferentialAttachment::on(&seed)
///     .edge_count_distribution(&[0.0, 0.5, 0.5])
///     .grow_longitudinal(4, &mut rng)
///     .unwrap();
///
/// assert_eq!(history.times(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub struct PreferentialAttachment<'a, G> {
    seed: &'a G,
    edge_count: EdgeCount,
}

impl<'a, G> PreferentialAttachment<'a, G>
where
    G: Graph<Node = usize>,
{
    pub fn on(seed: &'a G) -> Self {
        Self {
            seed,
            edge_count: EdgeCount::Fixed(1),
        }
    }

    /// Every step adds exactly `m` edges, or as many as there are existing
    /// nodes if that is fewer.
    pub fn edges_per_step(self, m: usize) -> Self {
        Self {
            edge_count: EdgeCount::Fixed(m),
            ..self
        }
    }

    /// The number of edges of every step is drawn from the given
    /// probabilities, indexed by the edge count. The probabilities need not
    /// sum to one.
    pub fn edge_count_distribution(self, probabilities: &[f64]) -> Self {
        Self {
            edge_count: EdgeCount::Distribution(probabilities.to_vec()),
            ..self
        }
    }

    pub fn grow<H>(&self, steps: usize, rng: &mut Rng) -> Result<H, Error>
    where
        H: Create<Node = usize>,
    {
        let growth = self.run(steps, rng, |_| {})?;
        Ok(H::from_edges(true, growth.nodes, growth.edges))
    }

    /// Grows the graph and records the state after `i` steps at time `i`.
    /// Time zero is the seed. Every step stores a full snapshot, see
    /// [`grow_intervals`](Self::grow_intervals) for a compact history.
    pub fn grow_longitudinal(&self, steps: usize, rng: &mut Rng) -> Result<SlicedGraph<usize>, Error> {
        let mut history = SlicedGraph::new(true);

        self.run(steps, rng, |growth| {
            let snapshot = SparseGraph::from_edges(true, growth.nodes.iter().copied(), growth.edges.iter());
            history.push_unchecked(growth.step as f64, snapshot);
        })?;

        Ok(history)
    }

    /// Grows the graph like [`grow_longitudinal`](Self::grow_longitudinal),
    /// but stores every node and edge once, present from the step it was
    /// added on. The slices at the same times are equal.
    pub fn grow_intervals(&self, steps: usize, rng: &mut Rng) -> Result<IntervalGraph<usize>, Error> {
        let mut history = IntervalGraph::new(true);
        let mut recorded_nodes = 0;
        let mut recorded_edges = 0;

        self.run(steps, rng, |growth| {
            let presence = Interval {
                start: growth.step as f64,
                end: f64::INFINITY,
            };

            for &node in &growth.nodes[recorded_nodes..] {
                history.insert_node(node, presence);
            }

            for &(src, dst) in &growth.edges[recorded_edges..] {
                history.insert_edge(src, dst, presence);
            }

            recorded_nodes = growth.nodes.len();
            recorded_edges = growth.edges.len();
        })?;

        Ok(history)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.seed.order() == 0 {
            return Err(Error::EmptySeed);
        }

        if !self.seed.is_directed() {
            return Err(Error::UndirectedSeed);
        }

        if let EdgeCount::Distribution(ref probabilities) = self.edge_count {
            for (index, &value) in probabilities.iter().enumerate() {
                if value.is_nan() || value < 0.0 {
                    return Err(Error::NegativeProbability { index, value });
                }
            }

            if probabilities.iter().sum::<f64>() <= 0.0 {
                return Err(Error::EmptyDistribution);
            }
        }

        Ok(())
    }

    fn run<F>(&self, steps: usize, rng: &mut Rng, mut checkpoint: F) -> Result<Growth, Error>
    where
        F: FnMut(&Growth),
    {
        self.validate()?;

        let nodes = self.seed.nodes().collect::<Vec<_>>();
        let edges = self.seed.edges();
        let next = nodes.iter().max().map_or(0, |max| max + 1);

        // Every node appears once for each unit of its degree.
        let urn = edges.iter().flat_map(|&(src, dst)| [src, dst]).collect();

        let mut growth = Growth {
            step: 0,
            nodes,
            edges,
            urn,
        };

        checkpoint(&growth);

        for step in 1..=steps {
            let node = next + step - 1;
            let count = self.edge_count(rng).min(growth.nodes.len());
            let targets = growth.targets(count, rng);

            for &target in &targets {
                growth.edges.push((node, target));
                growth.urn.push(node);
                growth.urn.push(target);
            }

            growth.nodes.push(node);
            growth.step = step;

            trace!(step, node, edges = targets.len(), "preferential attachment step");
            checkpoint(&growth);
        }

        Ok(growth)
    }

    fn edge_count(&self, rng: &mut Rng) -> usize {
        match self.edge_count {
            EdgeCount::Fixed(m) => m,
            EdgeCount::Distribution(ref probabilities) => {
                let total = probabilities.iter().sum::<f64>();
                let mut remaining = rng.f64() * total;

                for (count, &p) in probabilities.iter().enumerate() {
                    if remaining < p {
                        return count;
                    }
                    remaining -= p;
                }

                // Rounding may leave a tiny remainder, fall back to the last
                // possible count.
                probabilities.iter().rposition(|&p| p > 0.0).unwrap_or(0)
            }
        }
    }
}

struct Growth {
    step: usize,
    nodes: Vec<usize>,
    edges: Vec<(usize, usize)>,
    urn: Vec<usize>,
}

impl Growth {
    /// Chooses `count` distinct existing nodes, preferring nodes of high
    /// degree.
    fn targets(&self, count: usize, rng: &mut Rng) -> Vec<usize> {
        let mut chosen = FxHashSet::default();
        let mut targets = Vec::with_capacity(count);

        if !self.urn.is_empty() {
            let mut draws = 0;

            while targets.len() < count && draws < count * MAX_DRAWS_PER_TARGET {
                let target = self.urn[rng.usize(..self.urn.len())];

                if chosen.insert(target) {
                    targets.push(target);
                }

                draws += 1;
            }
        }

        if targets.len() < count {
            // Nodes of zero degree, or too few distinct nodes in the urn.
            let mut rest = self
                .nodes
                .iter()
                .copied()
                .filter(|node| !chosen.contains(node))
                .collect::<Vec<_>>();
            rng.shuffle(&mut rest);
            targets.extend(rest.into_iter().take(count - targets.len()));
        }

        targets
    }
}
