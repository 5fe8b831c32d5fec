use std::{
    hash::Hash,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

use fastrand::Rng;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

use crate::core::Graph;

use super::LongitudinalGraph;

/// Distances below this are treated as this to keep forces finite.
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

pub type PositionMap<N> = FxHashMap<N, Point>;

/// Parameters of the force-directed simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParameters {
    /// Ideal length of an edge.
    pub spring_length: f64,
    /// Multiplier of the repulsive force between every two nodes.
    pub repulsion: f64,
    /// Multiplier of the attractive force along edges.
    pub spring_strength: f64,
    /// Maximum displacement of a node in the first iteration.
    pub initial_temperature: f64,
    /// Factor by which the temperature decreases after every iteration.
    pub cooling: f64,
    /// Temperature never decreases below this.
    pub min_temperature: f64,
    /// Seed of the random placement. Random if not set.
    pub seed: Option<u64>,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            spring_length: 30.0,
            repulsion: 1.0,
            spring_strength: 1.0,
            initial_temperature: 20.0,
            cooling: 0.95,
            min_temperature: 0.5,
            seed: None,
        }
    }
}

impl LayoutParameters {
    pub fn spring_length(self, spring_length: f64) -> Self {
        Self {
            spring_length,
            ..self
        }
    }

    pub fn repulsion(self, repulsion: f64) -> Self {
        Self { repulsion, ..self }
    }

    pub fn spring_strength(self, spring_strength: f64) -> Self {
        Self {
            spring_strength,
            ..self
        }
    }

    pub fn initial_temperature(self, initial_temperature: f64) -> Self {
        Self {
            initial_temperature,
            ..self
        }
    }

    pub fn cooling(self, cooling: f64) -> Self {
        Self { cooling, ..self }
    }

    pub fn min_temperature(self, min_temperature: f64) -> Self {
        Self {
            min_temperature,
            ..self
        }
    }

    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The graph changed since the last iteration. The layout has been
    /// refreshed and the iteration skipped.
    #[error("graph topology changed, iteration skipped")]
    TopologyChanged,
}

#[derive(Debug, Clone, Copy)]
struct Spring {
    src: usize,
    dst: usize,
    /// Fraction of slices containing the edge.
    weight: f64,
}

/// Force-directed layout of a longitudinal graph.
///
/// All nodes that appear in any slice are laid out together, so a node keeps
/// its position across slices. Every two nodes repel each other and nodes
/// connected in some slice attract each other, more strongly the more slices
/// contain the edge, in the manner of Fruchterman and Reingold. The
/// displacement of a node in one iteration is limited by a temperature which
/// cools down geometrically to a floor.
///
/// The layout keeps a snapshot of the nodes and edges of the graph, tagged by
/// the graph [version](LongitudinalGraph::version). An iteration over a graph
/// with a different version refreshes the snapshot instead of moving nodes.
///
/// # Examples
///
/// ```
/// use tempograph::{
///     core::Create,
///     storage::SparseGraph,
///     time::{LayoutParameters, SimultaneousLayout, SlicedGraph},
/// };
///
/// let mut graph = SlicedGraph::new(false);
/// graph.push(0.0, SparseGraph::from_edges(false, [1, 2, 3], [(1, 2), (2, 3)])).unwrap();
///
/// let mut layout = SimultaneousLayout::new(&graph, LayoutParameters::default().seed(1));
///
/// for _ in 0..100 {
///     layout.iterate(&graph).unwrap();
/// }
///
/// let positions = layout.position_map(&graph, 0.0);
/// assert_eq!(positions.len(), 3);
/// assert!(positions[&1].distance(positions[&3]) > positions[&1].distance(positions[&2]));
/// ```
#[derive(Debug, Clone)]
pub struct SimultaneousLayout<N> {
    params: LayoutParameters,
    rng: Rng,
    nodes: Vec<N>,
    indices: FxHashMap<N, usize>,
    positions: Vec<Point>,
    springs: Vec<Spring>,
    version: u64,
    temperature: f64,
    iterations: u64,
}

impl<N: Clone + Eq + Hash> SimultaneousLayout<N> {
    pub fn new<L>(graph: &L, params: LayoutParameters) -> Self
    where
        L: LongitudinalGraph<Node = N>,
    {
        let rng = match params.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };

        let mut layout = Self {
            temperature: params.initial_temperature,
            params,
            rng,
            nodes: Vec::new(),
            indices: FxHashMap::default(),
            positions: Vec::new(),
            springs: Vec::new(),
            version: graph.version(),
            iterations: 0,
        };

        layout.refresh(graph);
        layout
    }

    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn position(&self, node: &N) -> Option<Point> {
        self.indices.get(node).map(|&i| self.positions[i])
    }

    /// Positions of all nodes of the layout.
    pub fn positions(&self) -> PositionMap<N> {
        self.nodes
            .iter()
            .cloned()
            .zip(self.positions.iter().copied())
            .collect()
    }

    /// Positions of the nodes of the slice at `time`, see
    /// [`LongitudinalGraph::slice`].
    pub fn position_map<L>(&self, graph: &L, time: f64) -> PositionMap<N>
    where
        L: LongitudinalGraph<Node = N>,
    {
        let Some(slice) = graph.slice(time, false) else {
            return PositionMap::default();
        };

        slice
            .nodes()
            .filter_map(|node| {
                let position = self.position(&node)?;
                Some((node, position))
            })
            .collect()
    }

    /// Rebuilds the node and edge snapshot from the graph. Nodes already laid
    /// out keep their positions, new nodes are placed near the centroid.
    pub fn refresh<L>(&mut self, graph: &L)
    where
        L: LongitudinalGraph<Node = N>,
    {
        let centroid = self.centroid();
        let spread = self.params.spring_length;

        let nodes = graph.all_nodes();
        let mut positions = Vec::with_capacity(nodes.len());

        for node in &nodes {
            let position = match self.position(node) {
                Some(position) => position,
                None if self.positions.is_empty() => {
                    // Initial placement in a square that fits all nodes.
                    let side = spread * (nodes.len() as f64).sqrt();
                    Point::new(
                        (self.rng.f64() - 0.5) * side,
                        (self.rng.f64() - 0.5) * side,
                    )
                }
                None => {
                    centroid
                        + Point::new(
                            (self.rng.f64() - 0.5) * spread,
                            (self.rng.f64() - 0.5) * spread,
                        )
                }
            };

            positions.push(position);
        }

        let indices = nodes
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect::<FxHashMap<_, _>>();

        let times = graph.times();
        let mut counts = FxHashMap::<(usize, usize), usize>::default();

        for &time in &times {
            let Some(slice) = graph.slice(time, true) else {
                continue;
            };

            for (src, dst) in slice.edges() {
                if let (Some(&i), Some(&j)) = (indices.get(&src), indices.get(&dst)) {
                    if i != j {
                        // Forces are symmetric, so the orientation is irrelevant.
                        *counts.entry((i.min(j), i.max(j))).or_default() += 1;
                    }
                }
            }
        }

        let slice_count = times.len().max(1) as f64;
        let mut springs = counts
            .into_iter()
            .map(|((src, dst), count)| Spring {
                src,
                dst,
                weight: count as f64 / slice_count,
            })
            .collect::<Vec<_>>();
        // Deterministic order of force accumulation.
        springs.sort_unstable_by_key(|spring| (spring.src, spring.dst));

        self.nodes = nodes;
        self.indices = indices;
        self.positions = positions;
        self.springs = springs;
        self.version = graph.version();
    }

    /// Performs one iteration on the snapshot of the graph. If the graph
    /// changed since the snapshot was taken, the snapshot is refreshed and
    /// the iteration is skipped.
    pub fn iterate<L>(&mut self, graph: &L) -> Result<(), LayoutError>
    where
        L: LongitudinalGraph<Node = N>,
    {
        if graph.version() != self.version {
            self.refresh(graph);
            return Err(LayoutError::TopologyChanged);
        }

        self.step();
        Ok(())
    }

    /// Performs one iteration on the current snapshot and returns the sum of
    /// node displacements.
    pub fn step(&mut self) -> f64 {
        let n = self.positions.len();
        let k = self.params.spring_length;
        let mut displacement = vec![Point::default(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let mut delta = self.positions[i] - self.positions[j];

                if delta.length() < MIN_DISTANCE {
                    // Nodes too close to tell the direction apart are pushed
                    // in a random one.
                    delta = Point::new(self.rng.f64() - 0.5, self.rng.f64() - 0.5) * MIN_DISTANCE;
                }

                let distance = delta.length().max(MIN_DISTANCE);
                let force = self.params.repulsion * k * k / distance;
                let push = delta / distance * force;

                displacement[i] += push;
                displacement[j] -= push;
            }
        }

        for spring in &self.springs {
            let delta = self.positions[spring.src] - self.positions[spring.dst];
            let distance = delta.length().max(MIN_DISTANCE);
            let force = self.params.spring_strength * spring.weight * distance * distance / k;
            let pull = delta / distance * force;

            displacement[spring.src] -= pull;
            displacement[spring.dst] += pull;
        }

        let mut total = 0.0;

        for (position, displacement) in self.positions.iter_mut().zip(displacement) {
            let length = displacement.length();

            if length > 0.0 && length.is_finite() {
                let step = length.min(self.temperature);
                *position += displacement / length * step;
                total += step;
            }
        }

        trace!(
            iteration = self.iterations,
            temperature = self.temperature,
            displacement = total,
            "layout iteration"
        );

        self.temperature = (self.temperature * self.params.cooling).max(self.params.min_temperature);
        self.iterations += 1;

        total
    }

    fn centroid(&self) -> Point {
        if self.positions.is_empty() {
            return Point::default();
        }

        let sum = self
            .positions
            .iter()
            .fold(Point::default(), |sum, &position| sum + position);
        sum / self.positions.len() as f64
    }
}
