//! Time-indexed graphs and their shared force-directed layout.
//!
//! A [`LongitudinalGraph`] is a sequence of topology snapshots at sorted event
//! times. [`SimultaneousLayout`] lays out all of its nodes at once, so that a
//! node keeps its position when the visible time changes.
//! [`TimeGraphManager`] ties the graph and the layout together, iterates the
//! layout on a background thread and notifies subscribers about changes.
//!
//! # Examples
//!
//! ```
//! use tempograph::{
//!     core::{Create, Graph},
//!     storage::SparseGraph,
//!     time::{LongitudinalGraph, SlicedGraph},
//! };
//!
//! let mut graph = SlicedGraph::new(false);
//! graph.push(1.0, SparseGraph::from_edges(false, [1, 2], [(1, 2)])).unwrap();
//! graph.push(3.0, SparseGraph::from_edges(false, [1, 2, 3], [(1, 2), (2, 3)])).unwrap();
//!
//! assert_eq!(graph.slice(2.5, false).unwrap().order(), 2);
//! assert_eq!(graph.slice(3.0, true).unwrap().order(), 3);
//! assert!(graph.slice(2.5, true).is_none());
//! ```

use std::io;

use thiserror::Error;

mod interval;
mod layout;
mod longitudinal;
mod manager;
mod sliced;

pub use interval::{Interval, IntervalGraph};
pub use layout::{LayoutError, LayoutParameters, Point, PositionMap, SimultaneousLayout};
pub use longitudinal::LongitudinalGraph;
pub use manager::{
    Event, LayoutStats, Signal, Subscription, SubscriptionId, TaskConfig, TimeGraphManager,
};
pub use sliced::SlicedGraph;

/// Error encountered when building a longitudinal graph or controlling the
/// layout task.
#[derive(Debug, Error)]
pub enum Error {
    /// Slices must be pushed in strictly increasing time order.
    #[error("time {time} is not after the last time {last}")]
    TimeOutOfOrder { time: f64, last: f64 },

    /// Interval start is after its end or one of them is NaN.
    #[error("interval [{start}, {end}] is invalid")]
    InvalidInterval { start: f64, end: f64 },

    /// A slice has different directedness than the longitudinal graph.
    #[error("slice directedness does not match the graph")]
    DirectednessMismatch,

    /// The layout thread could not be spawned.
    #[error("failed to spawn layout task")]
    Spawn(#[from] io::Error),
}
