//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the kernel:
//! - Scalar math helpers and constants
//! - Comparison tolerance
//! - Logging utilities

pub mod math;
pub mod tolerance;
pub mod logging;

pub use tolerance::Tolerance;
