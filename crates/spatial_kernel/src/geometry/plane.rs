//! Half-space plane in coefficient form

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::Tolerance;
use crate::math::Vector;

/// Hyperplane `dot(normal, p) + d = 0` stored as `D + 1` coefficients
///
/// The first `D` coefficients are the normal and the last is `d`. Points with
/// a positive signed distance lie on the front side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaneFields")]
pub struct Plane {
    coefficients: Vector,
}

#[derive(Deserialize)]
#[serde(rename = "Plane")]
struct PlaneFields {
    coefficients: Vector,
}

impl TryFrom<PlaneFields> for Plane {
    type Error = GeometryError;

    fn try_from(fields: PlaneFields) -> GeometryResult<Self> {
        Self::new(fields.coefficients)
    }
}

impl Plane {
    /// Create a plane from `D + 1` coefficients (`D >= 1`)
    pub fn new(coefficients: Vector) -> GeometryResult<Self> {
        if coefficients.len() < 2 {
            return Err(GeometryError::InvalidArgument(format!(
                "plane needs at least 2 coefficients, got {}",
                coefficients.len()
            )));
        }
        Ok(Self { coefficients })
    }

    /// Create a plane from its normal and distance term
    pub fn from_normal_distance(normal: &Vector, distance: f64) -> GeometryResult<Self> {
        Self::new(normal.iter().copied().chain(std::iter::once(distance)).collect())
    }

    /// Plane through `point` facing `normal`
    pub fn from_point_normal(point: &Vector, normal: &Vector) -> GeometryResult<Self> {
        let distance = -normal.dot(point)?;
        Self::from_normal_distance(normal, distance)
    }

    /// All `D + 1` coefficients
    pub const fn coefficients(&self) -> &Vector {
        &self.coefficients
    }

    /// Number of axes of the space the plane lives in
    pub fn dimension(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The normal (first `D` coefficients)
    pub fn normal(&self) -> Vector {
        Vector::from_slice(&self.coefficients.as_slice()[..self.dimension()])
    }

    /// The distance term `d`
    pub fn distance(&self) -> f64 {
        self.coefficients[self.dimension()]
    }

    /// `dot(normal, point) + d`
    pub fn signed_distance(&self, point: &Vector) -> GeometryResult<f64> {
        GeometryError::check_dimension(self.dimension(), point.len())?;
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(point.iter())
            .map(|(n, p)| n * p)
            .sum();
        Ok(dot + self.distance())
    }

    /// Same plane with a unit-length normal
    pub fn normalized(&self, tolerance: &Tolerance) -> GeometryResult<Self> {
        let length = self.normal().length();
        if tolerance.is_zero(length) {
            return Err(GeometryError::NumericDegenerate(format!(
                "plane normal has length {length}"
            )));
        }
        Ok(Self { coefficients: self.coefficients.divide(length) })
    }

    /// Same plane facing the other way
    pub fn flipped(&self) -> Self {
        Self { coefficients: -&self.coefficients }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        assert!(Plane::new(Vector::vector2(1.0, 0.0)).is_ok());
        assert!(Plane::new(Vector::new(vec![1.0])).is_err());

        let p = Plane::from_point_normal(&Vector::vector3(0.0, 0.0, 2.0), &Vector::vector3(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(p.coefficients(), &Vector::vector4(0.0, 0.0, 1.0, -2.0));
        assert_eq!(p.normal(), Vector::vector3(0.0, 0.0, 1.0));
        assert_eq!(p.distance(), -2.0);
        assert_eq!(p.dimension(), 3);
    }

    #[test]
    fn test_signed_distance() {
        let p = Plane::from_normal_distance(&Vector::vector2(0.0, 1.0), -1.0).unwrap();
        assert_eq!(p.signed_distance(&Vector::vector2(5.0, 3.0)).unwrap(), 2.0);
        assert_eq!(p.signed_distance(&Vector::vector2(5.0, 0.0)).unwrap(), -1.0);
        assert_eq!(p.flipped().signed_distance(&Vector::vector2(5.0, 0.0)).unwrap(), 1.0);
        assert!(p.signed_distance(&Vector::zeros(3)).is_err());
    }

    #[test]
    fn test_normalized() {
        let tolerance = Tolerance::default();
        let p = Plane::new(Vector::vector3(3.0, 4.0, 10.0)).unwrap().normalized(&tolerance).unwrap();
        assert_relative_eq!(p.normal().length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.distance(), 2.0, epsilon = 1e-12);

        let flat = Plane::new(Vector::vector3(0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(flat.normalized(&tolerance), Err(GeometryError::NumericDegenerate(_))));
    }

    #[test]
    fn test_deserialize_checks_coefficients() {
        let p = Plane::from_normal_distance(&Vector::vector2(0.0, 1.0), -1.0).unwrap();
        let text = ron::to_string(&p).unwrap();
        assert_eq!(ron::from_str::<Plane>(&text).unwrap(), p);

        let bare = ron::to_string(&Vector::new(vec![1.0])).unwrap();
        assert!(ron::from_str::<Plane>(&format!("(coefficients: {bare})")).is_err());
    }
}
