//! N-dimensional recursive space partitioning
//!
//! A [`SpatialTree`] owns an arena of [`SpatialTreeNode`]s addressed by
//! [`NodeId`]. Each split cuts a node's domain along every axis at caller
//! supplied fractions, and [`SpatialTree::traverse`] locates the leaves that
//! contain a point.

mod node;
mod traverse;
mod tree;

pub use node::{NodeId, SpatialTreeNode};
pub use traverse::Traverse;
pub use tree::{SpatialTree, TreeConfig};
