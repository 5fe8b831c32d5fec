//! Analysis algorithms over any [`Graph`](crate::core::Graph).
//!
//! All algorithms are synchronous and read-only. Results that are indexed by
//! node position follow the order of [`nodes`](crate::core::Graph::nodes).
//!
//! # Examples
//!
//! ```
//! use tempograph::{algo, generate::cycle_graph, storage::SparseGraph};
//!
//! let graph: SparseGraph<usize> = cycle_graph(6, false);
//!
//! assert_eq!(algo::geodesic_distance(&graph, &0, &3), Some(3));
//! assert_eq!(algo::degree_distribution(&graph), vec![0, 0, 6]);
//! assert_eq!(algo::components(&graph).unwrap().len(), 1);
//! ```

use thiserror::Error;

mod adjacency;
mod components;
mod degree;
mod geodesic;
mod neighborhood;

pub use adjacency::{adjacency_matrix, adjacency_matrix_powers, multiply};
pub use components::{component, component_graphs, components, is_connected};
pub use degree::{degree_distribution, degrees};
pub use geodesic::{geodesic_distance, geodesic_distances, geodesic_tree};
pub use neighborhood::neighborhood;

/// Error encountered by an analysis algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The algorithm is defined only for undirected graphs.
    #[error("algorithm requires an undirected graph")]
    DirectedGraph,
}
