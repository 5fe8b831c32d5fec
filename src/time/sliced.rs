use std::{hash::Hash, sync::Arc};

use rustc_hash::FxHashSet;

use crate::{core::Graph, storage::SparseGraph};

use super::{
    longitudinal::{resolve_time, LongitudinalGraph},
    Error,
};

/// Longitudinal graph stored as a list of snapshots.
///
/// Slices are shared, so taking a slice is cheap and the slice stays valid
/// after the graph grows.
#[derive(Debug, Clone)]
pub struct SlicedGraph<N> {
    directed: bool,
    times: Vec<f64>,
    slices: Vec<Arc<SparseGraph<N>>>,
    all_nodes: Vec<N>,
    seen: FxHashSet<N>,
    version: u64,
}

impl<N: Clone + Eq + Hash> SlicedGraph<N> {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            times: Vec::new(),
            slices: Vec::new(),
            all_nodes: Vec::new(),
            seen: FxHashSet::default(),
            version: 0,
        }
    }

    /// Appends a snapshot at `time`, which must be after all existing times.
    pub fn push(&mut self, time: f64, graph: SparseGraph<N>) -> Result<(), Error> {
        if graph.is_directed() != self.directed {
            return Err(Error::DirectednessMismatch);
        }

        let last = self.times.last().copied().unwrap_or(f64::NEG_INFINITY);

        if time.is_nan() || time <= last {
            return Err(Error::TimeOutOfOrder { time, last });
        }

        self.push_unchecked(time, graph);
        Ok(())
    }

    pub(crate) fn push_unchecked(&mut self, time: f64, graph: SparseGraph<N>) {
        for node in graph.nodes() {
            if self.seen.insert(node.clone()) {
                self.all_nodes.push(node);
            }
        }

        self.times.push(time);
        self.slices.push(Arc::new(graph));
        self.version += 1;
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Iterates over event times and their snapshots.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &SparseGraph<N>)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.slices.iter().map(|slice| slice.as_ref()))
    }
}

impl<N: Clone + Eq + Hash> LongitudinalGraph for SlicedGraph<N> {
    type Node = N;

    type Slice = Arc<SparseGraph<N>>;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn times(&self) -> Vec<f64> {
        self.times.clone()
    }

    fn minimum_time(&self) -> Option<f64> {
        self.times.first().copied()
    }

    fn maximum_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    fn all_nodes(&self) -> Vec<N> {
        self.all_nodes.clone()
    }

    fn slice(&self, time: f64, exact: bool) -> Option<Self::Slice> {
        let index = resolve_time(&self.times, time, exact)?;
        Some(Arc::clone(&self.slices[index]))
    }

    fn version(&self) -> u64 {
        self.version
    }
}
