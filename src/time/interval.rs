use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::{core::Create, storage::SparseGraph};

use super::{
    longitudinal::{resolve_time, LongitudinalGraph},
    Error,
};

/// Half-open time interval `[start, end)`.
///
/// The end is the time of removal, so an interval with `start == end` is
/// never present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Result<Self, Error> {
        if start.is_nan() || end.is_nan() || start > end {
            return Err(Error::InvalidInterval { start, end });
        }

        Ok(Self { start, end })
    }

    /// Interval that starts at `start` and never ends.
    pub fn since(start: f64) -> Result<Self, Error> {
        Self::new(start, f64::INFINITY)
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}

/// Longitudinal graph where nodes and edges are present during intervals.
///
/// Event times are all interval endpoints. The slice at a time contains the
/// nodes present at that time and the edges present at that time whose both
/// endpoints are present too. Presence ends at the end time, so a slice taken
/// between a removal and the next event no longer holds the removed items.
/// Infinite endpoints are not event times. A node or an edge may be added multiple times
/// with different intervals.
///
/// # Examples
///
/// ```
/// use tempograph::{core::Graph, time::{IntervalGraph, LongitudinalGraph}};
///
/// let mut graph = IntervalGraph::new(false);
/// graph.add_node("a", 0.0, 10.0).unwrap();
/// graph.add_node("b", 2.0, 4.0).unwrap();
/// graph.add_edge("a", "b", 0.0, 10.0).unwrap();
///
/// assert_eq!(graph.times(), vec![0.0, 2.0, 4.0, 10.0]);
/// assert_eq!(graph.slice(3.0, false).unwrap().edge_count(), 1);
/// assert_eq!(graph.slice(5.0, false).unwrap().edge_count(), 0);
/// assert!(!graph.slice(5.0, false).unwrap().contains(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct IntervalGraph<N> {
    directed: bool,
    nodes: Vec<(N, Interval)>,
    edges: Vec<(N, N, Interval)>,
    version: u64,
}

impl<N: Clone + Eq + Hash> IntervalGraph<N> {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            version: 0,
        }
    }

    pub fn add_node(&mut self, node: N, start: f64, end: f64) -> Result<(), Error> {
        self.insert_node(node, Interval::new(start, end)?);
        Ok(())
    }

    pub fn add_edge(&mut self, src: N, dst: N, start: f64, end: f64) -> Result<(), Error> {
        self.insert_edge(src, dst, Interval::new(start, end)?);
        Ok(())
    }

    pub fn insert_node(&mut self, node: N, interval: Interval) {
        self.nodes.push((node, interval));
        self.version += 1;
    }

    pub fn insert_edge(&mut self, src: N, dst: N, interval: Interval) {
        self.edges.push((src, dst, interval));
        self.version += 1;
    }

    fn snapshot(&self, time: f64) -> SparseGraph<N> {
        let alive = self
            .nodes
            .iter()
            .filter(|(_, interval)| interval.contains(time))
            .map(|(node, _)| node.clone())
            .collect::<Vec<_>>();
        let members = alive.iter().cloned().collect::<FxHashSet<_>>();

        let edges = self
            .edges
            .iter()
            .filter(|(src, dst, interval)| {
                interval.contains(time) && members.contains(src) && members.contains(dst)
            })
            .map(|(src, dst, _)| (src.clone(), dst.clone()));

        SparseGraph::from_edges(self.directed, alive, edges)
    }
}

impl<N: Clone + Eq + Hash> LongitudinalGraph for IntervalGraph<N> {
    type Node = N;

    type Slice = SparseGraph<N>;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn times(&self) -> Vec<f64> {
        let mut times = self
            .nodes
            .iter()
            .map(|(_, interval)| interval)
            .chain(self.edges.iter().map(|(_, _, interval)| interval))
            .flat_map(|interval| [interval.start, interval.end])
            .filter(|time| time.is_finite())
            .collect::<Vec<_>>();

        times.sort_by(f64::total_cmp);
        times.dedup();
        times
    }

    fn all_nodes(&self) -> Vec<N> {
        let mut seen = FxHashSet::default();

        self.nodes
            .iter()
            .filter(|(node, _)| seen.insert(node.clone()))
            .map(|(node, _)| node.clone())
            .collect()
    }

    fn slice(&self, time: f64, exact: bool) -> Option<SparseGraph<N>> {
        let times = self.times();
        let index = resolve_time(&times, time, exact)?;
        Some(self.snapshot(times[index]))
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{core::Graph, infra::testing::check_consistency};

    fn graph() -> IntervalGraph<u32> {
        let mut graph = IntervalGraph::new(true);

        graph.add_node(1, 0.0, 10.0).unwrap();
        graph.add_node(2, 1.0, 3.0).unwrap();
        graph.add_node(2, 6.0, 8.0).unwrap();
        graph.add_node(3, 2.0, 9.0).unwrap();
        graph.add_edge(1, 2, 0.0, 10.0).unwrap();
        graph.add_edge(3, 1, 4.0, 5.0).unwrap();

        graph
    }

    #[test]
    fn event_times() {
        assert_eq!(
            graph().times(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0]
        );
    }

    #[test]
    fn all_nodes_deduplicated() {
        assert_eq!(graph().all_nodes(), vec![1, 2, 3]);
    }

    #[test]
    fn slices_respect_intervals() {
        let graph = graph();

        let slice = graph.slice(2.5, false).unwrap();
        check_consistency(&slice).unwrap();
        assert_eq!(slice.nodes().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(slice.edges(), vec![(1, 2)]);

        // Node 2 is absent, so is its edge.
        let slice = graph.slice(4.5, false).unwrap();
        assert_eq!(slice.nodes().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(slice.edges(), vec![(3, 1)]);

        // Node 2 reappears.
        let slice = graph.slice(7.0, false).unwrap();
        assert!(slice.adjacent(&1, &2));
    }

    #[test]
    fn half_open_intervals() {
        let graph = graph();

        assert!(graph.slice(1.0, true).unwrap().contains(&2));
        assert!(!graph.slice(3.0, true).unwrap().contains(&2));
        assert!(graph.slice(4.0, true).unwrap().adjacent(&3, &1));
        assert!(!graph.slice(5.0, true).unwrap().adjacent(&3, &1));
        assert_eq!(graph.slice(10.0, true).unwrap().order(), 0);
    }

    #[test]
    fn removed_node_is_absent_until_next_event() {
        let mut graph = IntervalGraph::new(false);
        graph.add_node("a", 0.0, 10.0).unwrap();
        graph.add_node("b", 2.0, 4.0).unwrap();
        graph.add_edge("a", "b", 0.0, 10.0).unwrap();

        // Snaps down to the removal of "b" at 4.
        let slice = graph.slice(7.0, false).unwrap();
        assert_eq!(slice.nodes().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(slice.edge_count(), 0);
    }

    #[test]
    fn empty_interval_is_never_present() {
        let mut graph = IntervalGraph::new(false);
        graph.add_node(1u32, 0.0, 2.0).unwrap();
        graph.add_node(2, 1.0, 1.0).unwrap();

        assert_eq!(graph.times(), vec![0.0, 1.0, 2.0]);
        assert!(!graph.slice(1.0, true).unwrap().contains(&2));
    }

    #[test]
    fn exact_miss() {
        assert!(graph().slice(2.5, true).is_none());
    }

    #[test]
    fn unbounded_intervals() {
        let mut graph = IntervalGraph::new(true);
        graph.insert_node(1u32, Interval::since(0.0).unwrap());
        graph.insert_node(2, Interval::since(3.0).unwrap());
        graph.insert_edge(2, 1, Interval::since(3.0).unwrap());

        assert_eq!(graph.times(), vec![0.0, 3.0]);
        assert_eq!(graph.maximum_time(), Some(3.0));
        assert_eq!(graph.slice(1e9, false).unwrap().edges(), vec![(2, 1)]);
        assert_eq!(graph.slice(1.0, false).unwrap().order(), 1);
        assert_matches!(Interval::since(f64::NAN), Err(Error::InvalidInterval { .. }));
    }

    #[test]
    fn invalid_interval() {
        let mut graph = IntervalGraph::new(false);

        assert_matches!(
            graph.add_node(1, 2.0, 1.0),
            Err(Error::InvalidInterval { .. })
        );
        assert_matches!(
            graph.add_edge(1, 2, f64::NAN, 1.0),
            Err(Error::InvalidInterval { .. })
        );
        assert_eq!(graph.version(), 0);
    }
}
