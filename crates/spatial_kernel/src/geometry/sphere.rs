//! Bounding sphere

use serde::{Deserialize, Serialize};

use crate::collision::Containment;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Domain;
use crate::math::Vector;

/// Sphere (or circle, or hypersphere) given by a center and radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SphereFields")]
pub struct Sphere {
    center: Vector,
    radius: f64,
}

#[derive(Deserialize)]
#[serde(rename = "Sphere")]
struct SphereFields {
    center: Vector,
    radius: f64,
}

impl TryFrom<SphereFields> for Sphere {
    type Error = GeometryError;

    fn try_from(fields: SphereFields) -> GeometryResult<Self> {
        Self::new(fields.center, fields.radius)
    }
}

impl Sphere {
    /// Create a sphere; the radius must be finite and non-negative
    pub fn new(center: Vector, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "sphere radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Center point
    pub const fn center(&self) -> &Vector {
        &self.center
    }

    /// Radius
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of axes
    pub fn dimension(&self) -> usize {
        self.center.len()
    }

    /// `Contains` when `|p - c|² <= r²`, otherwise `Disjoint`
    pub fn test_point(&self, point: &Vector) -> GeometryResult<Containment> {
        let distance_squared = self.center.distance_squared(point)?;
        if distance_squared <= self.radius * self.radius {
            Ok(Containment::Contains)
        } else {
            Ok(Containment::Disjoint)
        }
    }

    /// Relation of `other` to this sphere
    ///
    /// `Disjoint` when the centers are further apart than the radii sum,
    /// `Contains` when `other` lies fully inside, `Intersects` otherwise.
    pub fn test_sphere(&self, other: &Self) -> GeometryResult<Containment> {
        let distance = self.center.distance(&other.center)?;
        if self.radius + other.radius < distance {
            Ok(Containment::Disjoint)
        } else if self.radius - other.radius >= distance {
            Ok(Containment::Contains)
        } else {
            Ok(Containment::Intersects)
        }
    }

    /// Smallest axis-aligned box enclosing the sphere
    pub fn bounding_domain(&self) -> Domain {
        let minimum = self.center.sub_scalar(self.radius);
        let maximum = self.center.add_scalar(self.radius);
        Domain::from_ordered_corners(minimum, maximum)
    }
}
