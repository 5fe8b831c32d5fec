//! Derived views and wrappers over existing graphs.
//!
//! Views never copy the topology of their parent. [`Subgraph`] and
//! [`ContractedGraph`] borrow the parent, so the parent outlives every view
//! derived from it. The valued wrappers take the graph by value, which can be
//! a reference too since `&G` implements [`Graph`](crate::core::Graph).

mod contracted;
mod subgraph;
mod valued;

pub use contracted::{ContractError, ContractedGraph};
pub use subgraph::{Subgraph, SubgraphIter};
pub use valued::{ValuedGraphWrapper, WeightedValuedGraphWrapper};
