//! Plane-based tests

use log::trace;

use super::{Collision, PlaneSide};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{Domain, Plane, Ray, Sphere};
use crate::math::Vector;

impl Collision {
    /// Side of `plane` that `point` lies on
    pub fn plane_point(&self, plane: &Plane, point: &Vector) -> GeometryResult<PlaneSide> {
        Ok(self.classify(plane.signed_distance(point)?, 0.0))
    }

    /// Side of `plane` that `sphere` lies on
    ///
    /// Front when `s > r + ε`, back when `s < -(r + ε)`.
    pub fn plane_sphere(&self, plane: &Plane, sphere: &Sphere) -> GeometryResult<PlaneSide> {
        let distance = plane.signed_distance(sphere.center())?;
        Ok(self.classify(distance, sphere.radius()))
    }

    /// Side of `plane` that `domain` lies on
    ///
    /// Only the two corners extreme along the normal are tested: the box is
    /// in front when its nearest corner is, behind when its farthest corner is.
    pub fn plane_box(&self, plane: &Plane, domain: &Domain) -> GeometryResult<PlaneSide> {
        GeometryError::check_dimension(plane.dimension(), domain.dimension())?;
        let normal = plane.normal();
        let positive = domain.corner(|axis| normal[axis] >= 0.0);
        let negative = domain.corner(|axis| normal[axis] < 0.0);

        let near = plane.signed_distance(&negative)?;
        let far = plane.signed_distance(&positive)?;
        Ok(match (self.classify(near, 0.0), self.classify(far, 0.0)) {
            (PlaneSide::Front, _) => PlaneSide::Front,
            (_, PlaneSide::Back) => PlaneSide::Back,
            _ => PlaneSide::Intersecting,
        })
    }

    /// Distance along `ray` to where it crosses `plane`
    ///
    /// `None` when the ray runs parallel to the plane (within tolerance) or
    /// the crossing lies behind the origin.
    pub fn ray_plane(&self, ray: &Ray, plane: &Plane) -> GeometryResult<Option<f64>> {
        GeometryError::check_dimension(plane.dimension(), ray.dimension())?;
        let denominator = plane.normal().dot(ray.direction())?;
        if self.tolerance.is_zero(denominator) {
            trace!("ray parallel to plane (n·dir = {denominator})");
            return Ok(None);
        }
        let t = -plane.signed_distance(ray.position())? / denominator;
        Ok((t >= 0.0).then_some(t))
    }
}
