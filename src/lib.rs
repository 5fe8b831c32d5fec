//! Graph engine with interchangeable storages, non-copying views, analysis
//! algorithms, structural generators and a time-indexed graph laid out by a
//! shared force-directed simulation.
//!
//! * [`core`] defines the [`Graph`](core::Graph) contract every other module
//!   builds on.
//! * [`storage`] provides the [`MatrixGraph`](storage::MatrixGraph) and
//!   [`SparseGraph`](storage::SparseGraph) representations.
//! * [`adapt`] wraps existing graphs in views and value tables.
//! * [`algo`] and [`generate`] analyze and produce graphs.
//! * [`time`] holds longitudinal graphs, their layout and the manager that
//!   animates it.

pub mod adapt;
pub mod algo;
pub mod core;
pub mod generate;
pub mod infra;
pub mod storage;
pub mod time;
