//! Geometric primitives
//!
//! Boxes, spheres, planes, rays and frusta over [`Vector`](crate::math::Vector).
//! The primitives are plain values; the tolerance-aware intersection tests
//! live in [`crate::collision`].

pub mod domain;
pub mod frustum;
pub mod plane;
pub mod ray;
pub mod sphere;

pub use domain::{Aabb, Domain};
pub use frustum::Frustum;
pub use plane::Plane;
pub use ray::Ray;
pub use sphere::Sphere;
