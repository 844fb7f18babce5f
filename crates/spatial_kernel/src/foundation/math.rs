//! Scalar math utilities
//!
//! Small helpers shared by the vector, matrix and geometry modules.

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f64 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation that is exact at both `t = 0` and `t = 1`
    ///
    /// Equivalent to `a + (b - a) * t`.
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a.mul_add(1.0 - t, b * t)
    }
}
