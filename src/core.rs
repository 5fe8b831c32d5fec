//! The graph contract shared by storages, views and generators.
//!
//! Every graph in the crate implements [`Graph`]. Queries about a node that is
//! not part of the graph are never an error: the node is simply reported as
//! absent, with no neighbors and zero degree. This lets consumers that animate
//! or grow a graph poll it without synchronizing first.

pub mod facts;
pub mod marker;
pub(crate) mod matrix;

mod create;
mod edge;
mod graph;

pub use create::*;
pub use edge::*;
pub use graph::*;
