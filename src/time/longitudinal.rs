use std::hash::Hash;

use crate::core::Graph;

/// Graph whose topology changes at discrete event times.
///
/// # Slicing
///
/// [`slice`](LongitudinalGraph::slice) returns the topology at an event time.
/// A non-exact lookup snaps to the latest event time at or before the
/// requested time, or to the first event time if the requested time precedes
/// all events. An exact lookup of a time that is not an event time returns
/// `None`. A graph without event times has no slices.
///
/// # Versioning
///
/// [`version`](LongitudinalGraph::version) changes whenever the graph is
/// mutated. Consumers that cache derived data, such as the layout, compare
/// versions to detect that their cache is stale.
pub trait LongitudinalGraph {
    type Node: Clone + Eq + Hash;

    type Slice: Graph<Node = Self::Node>;

    fn is_directed(&self) -> bool;

    /// Event times in increasing order, without duplicates.
    fn times(&self) -> Vec<f64>;

    fn minimum_time(&self) -> Option<f64> {
        self.times().first().copied()
    }

    fn maximum_time(&self) -> Option<f64> {
        self.times().last().copied()
    }

    /// Every node that appears in any slice, in order of first appearance.
    fn all_nodes(&self) -> Vec<Self::Node>;

    fn slice(&self, time: f64, exact: bool) -> Option<Self::Slice>;

    fn version(&self) -> u64;
}

/// Index of the event time that a lookup of `time` resolves to.
pub(crate) fn resolve_time(times: &[f64], time: f64, exact: bool) -> Option<usize> {
    if times.is_empty() {
        return None;
    }

    let after = times.partition_point(|&t| t <= time);

    if exact {
        let index = after.checked_sub(1)?;
        (times[index] == time).then_some(index)
    } else {
        Some(after.saturating_sub(1))
    }
}
