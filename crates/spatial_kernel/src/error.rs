//! Error types shared by every kernel operation
//!
//! All fallible operations return [`GeometryResult`]. Errors are raised at the
//! point of violation, before any output is written. Outcomes that are
//! geometrically expected (a ray missing a plane, two volumes not touching)
//! are ordinary return values and never show up here.

use thiserror::Error;

/// Errors raised by vector, matrix, geometry and tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Operands have incompatible lengths or shapes
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension required by the operation
        expected: usize,
        /// Dimension that was supplied
        actual: usize,
    },

    /// A scalar input is out of range or otherwise meaningless
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required handle is absent or no longer refers to anything
    #[error("Missing input: {0}")]
    MissingNode(String),

    /// Inputs are individually valid but their combination is undefined
    #[error("Numerically degenerate: {0}")]
    NumericDegenerate(String),

    /// Component or element access outside the valid range
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of addressable elements
        len: usize,
    },
}

impl GeometryError {
    /// Fails with [`GeometryError::DimensionMismatch`] unless `actual == expected`
    pub(crate) fn check_dimension(expected: usize, actual: usize) -> GeometryResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}

/// Result alias used across the crate
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert!(GeometryError::check_dimension(3, 3).is_ok());
        assert_eq!(
            GeometryError::check_dimension(3, 2),
            Err(GeometryError::DimensionMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GeometryError::IndexOutOfBounds { index: 4, len: 3 };
        assert_eq!(err.to_string(), "Index 4 out of bounds for length 3");

        let err = GeometryError::NumericDegenerate("zero-length vector".to_string());
        assert_eq!(err.to_string(), "Numerically degenerate: zero-length vector");
    }
}
