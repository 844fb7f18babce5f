//! Tolerance used by approximate comparisons and degeneracy checks
//!
//! There is no process-wide epsilon. Operations that need one take a
//! [`Tolerance`] argument, or read it from a context object built once by
//! the application (see [`crate::collision::Collision`] and
//! [`crate::core::config::KernelConfig`]).

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// Absolute tolerance for scalar comparisons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ToleranceFields")]
pub struct Tolerance {
    epsilon: f64,
}

#[derive(Deserialize)]
#[serde(rename = "Tolerance")]
struct ToleranceFields {
    epsilon: f64,
}

impl TryFrom<ToleranceFields> for Tolerance {
    type Error = GeometryError;

    fn try_from(fields: ToleranceFields) -> GeometryResult<Self> {
        Self::new(fields.epsilon)
    }
}

impl Tolerance {
    /// Default absolute epsilon
    pub const DEFAULT_EPSILON: f64 = 1e-9;

    /// Exact comparisons (epsilon of zero)
    pub const EXACT: Self = Self { epsilon: 0.0 };

    /// Create a tolerance from an absolute epsilon
    ///
    /// The epsilon must be finite and non-negative.
    pub fn new(epsilon: f64) -> GeometryResult<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "tolerance must be finite and non-negative, got {epsilon}"
            )));
        }
        Ok(Self { epsilon })
    }

    /// The absolute epsilon
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `|a - b| <= epsilon`
    pub fn eq(&self, a: f64, b: f64) -> bool {
        a == b || (a - b).abs() <= self.epsilon
    }

    /// `|value| <= epsilon`
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { epsilon: Self::DEFAULT_EPSILON }
    }
}
