//! Vector and matrix algebra
//!
//! [`Vector`] and [`Matrix`] are dimension-agnostic; lengths and shapes are
//! checked at run time and mismatches surface as
//! [`GeometryError::DimensionMismatch`](crate::error::GeometryError::DimensionMismatch).

pub mod matrix;
pub mod transform;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
