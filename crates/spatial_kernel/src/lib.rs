//! # Spatial Kernel
//!
//! A small computational-geometry kernel: dimension-agnostic vector and
//! matrix algebra, geometric primitives with tolerance-aware collision tests,
//! and an N-dimensional recursive spatial partitioning tree.
//!
//! ## Features
//!
//! - **Algebra**: [`Vector`] and [`Matrix`] of any size, with checked
//!   operations and homogeneous transform constructors
//! - **Primitives**: boxes ([`Domain`]), spheres, planes, rays and frusta
//! - **Collision**: plane classification, containment and ray casts through
//!   a [`Collision`] context
//! - **Spatial Tree**: arena-backed [`SpatialTree`] with arbitrary per-axis splits
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_kernel::prelude::*;
//!
//! fn main() -> Result<(), GeometryError> {
//!     let mut tree: SpatialTree<u32> = SpatialTree::new(Domain::unit(2));
//!     let root = tree.root();
//!     let children = tree.split(root, &[vec![0.5], vec![0.5]])?;
//!
//!     let point = Vector::vector2(0.25, 0.25);
//!     let hits: Vec<NodeId> = tree.traverse(root, &point)?.collect();
//!     assert_eq!(hits, vec![children[0]]);
//!
//!     let collision = Collision::default();
//!     assert!(collision.contains(tree.domain(children[0])?, &point)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod core;
pub mod config;
pub mod error;
pub mod foundation;

pub mod collision;
pub mod geometry;
pub mod math;
pub mod spatial;

#[cfg(test)]
mod tests;

pub use collision::{Collision, Containment, PlaneSide};
pub use error::{GeometryError, GeometryResult};
pub use foundation::Tolerance;
pub use geometry::{Aabb, Domain, Frustum, Plane, Ray, Sphere};
pub use math::{Matrix, Vector};
pub use spatial::{NodeId, SpatialTree, SpatialTreeNode, TreeConfig};

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        collision::{Collision, Containment, PlaneSide},
        core::config::{Config, KernelConfig},
        error::{GeometryError, GeometryResult},
        foundation::Tolerance,
        geometry::{Aabb, Domain, Frustum, Plane, Ray, Sphere},
        math::{Matrix, Vector},
        spatial::{NodeId, SpatialTree, SpatialTreeNode, TreeConfig},
    };
}
