//! Structural generators.
//!
//! Generators produce graphs with nodes `0..n` in any representation that
//! implements [`Create`](crate::core::Create). Random generators take a
//! [`fastrand::Rng`] so that the caller controls seeding and reproducibility.
//!
//! # Examples
//!
//! ```
//! use tempograph::{
//!     algo,
//!     core::Graph,
//!     generate::{random_graph_with_edges, wheel_graph},
//!     storage::{MatrixGraph, SparseGraph},
//! };
//!
//! let wheel: MatrixGraph<usize> = wheel_graph(5, false);
//! assert_eq!(algo::degrees(&wheel), vec![4, 3, 3, 3, 3]);
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let random: SparseGraph<usize> = random_graph_with_edges(10, 20, false, &mut rng).unwrap();
//! assert_eq!(random.edge_count(), 20);
//! ```

use thiserror::Error;

mod canonical;
mod degree_sequence;
mod preferential;
mod random;

pub use canonical::{complete_graph, cycle_graph, empty_graph, path_graph, star_graph, wheel_graph};
pub use degree_sequence::{configuration_model, directed_configuration_model};
pub use preferential::PreferentialAttachment;
pub use random::{random_graph, random_graph_with_edges};

/// Error encountered by a generator. Generators fail before producing any
/// graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The sum of an undirected degree sequence is odd.
    #[error("sum of the degree sequence is odd")]
    OddDegreeSum,

    /// Out-degree and in-degree sequences have different lengths.
    #[error("out-degree sequence has {out_len} nodes but in-degree sequence has {in_len}")]
    LengthMismatch { out_len: usize, in_len: usize },

    /// Out-degree and in-degree sequences have different sums.
    #[error("out-degrees sum to {out_sum} but in-degrees sum to {in_sum}")]
    DegreeSumMismatch { out_sum: usize, in_sum: usize },

    /// The seed graph has no nodes.
    #[error("seed graph is empty")]
    EmptySeed,

    /// The seed graph is undirected.
    #[error("seed graph must be directed")]
    UndirectedSeed,

    /// The edge count distribution contains a negative or NaN probability.
    #[error("probability {value} of edge count {index} is negative")]
    NegativeProbability { index: usize, value: f64 },

    /// The edge count distribution has no positive probability.
    #[error("edge count distribution has no positive probability")]
    EmptyDistribution,

    /// The edge probability is not in `[0, 1]`.
    #[error("edge probability {0} is not in [0, 1]")]
    InvalidProbability(f64),

    /// More edges were requested than a simple graph can have.
    #[error("requested {requested} edges but at most {max} are possible")]
    TooManyEdges { requested: usize, max: usize },
}
