//! Convex region bounded by pairs of planes

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::Tolerance;
use crate::geometry::Plane;
use crate::math::Matrix;

/// Ordered set of planes, two per axis (minimum side then maximum side)
///
/// Every plane faces inward, so a point inside the frustum lies on the front
/// side of all of them. In 3-D the order is left, right, bottom, top, near, far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrustumFields")]
pub struct Frustum {
    planes: Vec<Plane>,
}

#[derive(Deserialize)]
#[serde(rename = "Frustum")]
struct FrustumFields {
    planes: Vec<Plane>,
}

impl TryFrom<FrustumFields> for Frustum {
    type Error = GeometryError;

    fn try_from(fields: FrustumFields) -> GeometryResult<Self> {
        Self::new(fields.planes)
    }
}

impl Frustum {
    /// Create a frustum from a non-empty, even number of same-dimension planes
    pub fn new(planes: Vec<Plane>) -> GeometryResult<Self> {
        if planes.is_empty() || planes.len() % 2 != 0 {
            return Err(GeometryError::InvalidArgument(format!(
                "frustum needs a non-empty, even number of planes, got {}",
                planes.len()
            )));
        }
        let dimension = planes[0].dimension();
        for plane in &planes[1..] {
            GeometryError::check_dimension(dimension, plane.dimension())?;
        }
        Ok(Self { planes })
    }

    /// Extract the clip planes of a `(D+1)×(D+1)` projection matrix
    ///
    /// For a row-vector matrix with columns `c₀ … c_D`, axis `i` is bounded by
    /// `c_D + cᵢ` (minimum side) and `c_D - cᵢ` (maximum side). Planes are
    /// normalized so signed distances are Euclidean.
    pub fn from_matrix(matrix: &Matrix, tolerance: &Tolerance) -> GeometryResult<Self> {
        if !matrix.is_square() || matrix.column_count() < 2 {
            return Err(GeometryError::InvalidArgument(format!(
                "frustum extraction needs a square matrix of size >= 2, got {}x{}",
                matrix.column_count(),
                matrix.row_count()
            )));
        }
        let dimension = matrix.column_count() - 1;
        let w = matrix.column(dimension)?;

        let mut planes = Vec::with_capacity(2 * dimension);
        for axis in 0..dimension {
            let column = matrix.column(axis)?;
            planes.push(Plane::new(w.add(&column)?)?.normalized(tolerance)?);
            planes.push(Plane::new(w.sub(&column)?)?.normalized(tolerance)?);
        }
        Self::new(planes)
    }

    /// The planes, in axis order
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Number of planes
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Number of axes of the space the planes live in
    pub fn dimension(&self) -> usize {
        self.planes.first().map_or(0, Plane::dimension)
    }

    /// Minimum and maximum planes bounding `axis`
    pub fn axis_planes(&self, axis: usize) -> Option<(&Plane, &Plane)> {
        Some((self.planes.get(2 * axis)?, self.planes.get(2 * axis + 1)?))
    }

    /// Iterate over the planes
    pub fn iter(&self) -> std::slice::Iter<'_, Plane> {
        self.planes.iter()
    }
}

impl<'a> IntoIterator for &'a Frustum {
    type Item = &'a Plane;
    type IntoIter = std::slice::Iter<'a, Plane>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
