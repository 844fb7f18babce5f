//! Box, sphere, ray and frustum tests

use super::{Collision, Containment};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{Domain, Frustum, Ray, Sphere};
use crate::math::Vector;

impl Collision {
    /// Strict interior test: `minimum < p < maximum` on every axis
    pub fn contains(&self, domain: &Domain, point: &Vector) -> GeometryResult<bool> {
        GeometryError::check_dimension(domain.dimension(), point.len())?;
        Ok(domain
            .minimum()
            .iter()
            .zip(domain.maximum().iter())
            .zip(point.iter())
            .all(|((lo, hi), p)| lo < p && p < hi))
    }

    /// Inclusive overlap of two boxes
    pub fn domain_domain(&self, a: &Domain, b: &Domain) -> GeometryResult<bool> {
        a.intersects(b)
    }

    /// Distance along `ray` to where it enters `domain` (slab method)
    ///
    /// Returns `Some(0.0)` when the origin is already inside.
    pub fn ray_domain(&self, ray: &Ray, domain: &Domain) -> GeometryResult<Option<f64>> {
        GeometryError::check_dimension(domain.dimension(), ray.dimension())?;
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;

        for axis in 0..domain.dimension() {
            let origin = ray.position()[axis];
            let direction = ray.direction()[axis];
            let (lo, hi) = (domain.minimum()[axis], domain.maximum()[axis]);

            if self.tolerance.is_zero(direction) {
                if origin < lo || origin > hi {
                    return Ok(None);
                }
                continue;
            }

            let inverse = direction.recip();
            let t1 = (lo - origin) * inverse;
            let t2 = (hi - origin) * inverse;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        if t_exit >= t_enter && t_exit >= 0.0 {
            Ok(Some(t_enter.max(0.0)))
        } else {
            Ok(None)
        }
    }

    /// Distance along `ray` to the nearest non-negative hit on `sphere`
    ///
    /// When the origin is inside, the exit distance is returned.
    pub fn ray_sphere(&self, ray: &Ray, sphere: &Sphere) -> GeometryResult<Option<f64>> {
        let offset = ray.position().sub(sphere.center())?;
        let a = ray.direction().length_squared();
        let half_b = offset.dot(ray.direction())?;
        let c = offset.length_squared() - sphere.radius() * sphere.radius();

        if self.tolerance.is_zero(a) {
            return Ok((c <= 0.0).then_some(0.0));
        }

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return Ok(None);
        }
        let root = discriminant.sqrt();
        let near = (-half_b - root) / a;
        let far = (-half_b + root) / a;
        Ok(if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        })
    }

    /// Relation of `point` to `frustum`
    pub fn frustum_point(&self, frustum: &Frustum, point: &Vector) -> GeometryResult<Containment> {
        GeometryError::check_dimension(frustum.dimension(), point.len())?;
        let sides = frustum
            .iter()
            .map(|plane| self.plane_point(plane, point))
            .collect::<GeometryResult<Vec<_>>>()?;
        Ok(Self::combine(sides))
    }

    /// Relation of `domain` to `frustum`
    pub fn frustum_domain(
        &self,
        frustum: &Frustum,
        domain: &Domain,
    ) -> GeometryResult<Containment> {
        GeometryError::check_dimension(frustum.dimension(), domain.dimension())?;
        let sides = frustum
            .iter()
            .map(|plane| self.plane_box(plane, domain))
            .collect::<GeometryResult<Vec<_>>>()?;
        Ok(Self::combine(sides))
    }

    /// Relation of `sphere` to `frustum`
    pub fn frustum_sphere(
        &self,
        frustum: &Frustum,
        sphere: &Sphere,
    ) -> GeometryResult<Containment> {
        GeometryError::check_dimension(frustum.dimension(), sphere.dimension())?;
        let sides = frustum
            .iter()
            .map(|plane| self.plane_sphere(plane, sphere))
            .collect::<GeometryResult<Vec<_>>>()?;
        Ok(Self::combine(sides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Tolerance;
    use crate::geometry::Plane;
    use crate::math::Matrix;

    fn unit_box() -> Domain {
        Domain::unit(3)
    }

    fn camera_frustum() -> Frustum {
        let projection = Matrix::perspective(2.0, 2.0, 1.0, 10.0).unwrap();
        Frustum::from_matrix(&projection, &Tolerance::default()).unwrap()
    }

    /// The 2-D square `[-1, 1]²` as a frustum
    fn square_frustum() -> Frustum {
        let plane = |a: f64, b: f64| Plane::new(Vector::vector3(a, b, 1.0)).unwrap();
        Frustum::new(vec![plane(1.0, 0.0), plane(-1.0, 0.0), plane(0.0, 1.0), plane(0.0, -1.0)])
            .unwrap()
    }

    #[test]
    fn test_contains_is_strict() {
        let c = Collision::default();
        let d = unit_box();
        assert!(c.contains(&d, &Vector::filled(3, 0.5)).unwrap());
        assert!(!c.contains(&d, &Vector::vector3(0.0, 0.5, 0.5)).unwrap());
        assert!(!c.contains(&d, &Vector::vector3(0.5, 1.0, 0.5)).unwrap());
        assert!(!c.contains(&d, &Vector::vector3(0.5, 0.5, 2.0)).unwrap());
        assert!(c.contains(&d, &Vector::zeros(2)).is_err());
    }

    #[test]
    fn test_domain_domain() {
        let c = Collision::default();
        let touching = Domain::new(Vector::filled(3, 1.0), Vector::filled(3, 2.0)).unwrap();
        let apart = Domain::new(Vector::filled(3, 1.5), Vector::filled(3, 2.0)).unwrap();
        assert!(c.domain_domain(&unit_box(), &touching).unwrap());
        assert!(!c.domain_domain(&unit_box(), &apart).unwrap());
    }

    #[test]
    fn test_ray_domain() {
        let c = Collision::default();
        let d = unit_box();

        let hit = Ray::new(Vector::vector3(-1.0, 0.5, 0.5), Vector::vector3(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_domain(&hit, &d).unwrap(), Some(1.0));

        let inside = Ray::new(Vector::filled(3, 0.5), Vector::vector3(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(c.ray_domain(&inside, &d).unwrap(), Some(0.0));

        let away = Ray::new(Vector::vector3(-1.0, 0.5, 0.5), Vector::vector3(-1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_domain(&away, &d).unwrap(), None);

        let beside = Ray::new(Vector::vector3(-1.0, 2.0, 0.5), Vector::vector3(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_domain(&beside, &d).unwrap(), None);

        let planar = Ray::new(Vector::zeros(2), Vector::vector2(1.0, 0.0)).unwrap();
        assert!(c.ray_domain(&planar, &d).is_err());
    }

    #[test]
    fn test_ray_sphere() {
        let c = Collision::default();
        let sphere = Sphere::new(Vector::vector3(5.0, 0.0, 0.0), 1.0).unwrap();

        let toward = Ray::new(Vector::zeros(3), Vector::vector3(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_sphere(&toward, &sphere).unwrap(), Some(4.0));

        let away = Ray::new(Vector::zeros(3), Vector::vector3(-1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_sphere(&away, &sphere).unwrap(), None);

        let miss = Ray::new(Vector::vector3(0.0, 2.0, 0.0), Vector::vector3(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.ray_sphere(&miss, &sphere).unwrap(), None);

        let from_center = Ray::new(Vector::vector3(5.0, 0.0, 0.0), Vector::vector3(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(c.ray_sphere(&from_center, &sphere).unwrap(), Some(1.0));
    }

    #[test]
    fn test_frustum_point() {
        let c = Collision::default();
        let f = camera_frustum();
        assert_eq!(c.frustum_point(&f, &Vector::vector3(0.0, 0.0, -5.0)).unwrap(), Containment::Contains);
        assert_eq!(c.frustum_point(&f, &Vector::vector3(0.0, 0.0, 5.0)).unwrap(), Containment::Disjoint);
        assert_eq!(c.frustum_point(&f, &Vector::vector3(0.0, 0.0, -1.0)).unwrap(), Containment::Intersects);
        assert!(c.frustum_point(&f, &Vector::zeros(2)).is_err());
    }

    #[test]
    fn test_frustum_domain() {
        let c = Collision::default();
        let f = square_frustum();
        let inner = Domain::new(Vector::filled(2, -0.5), Vector::filled(2, 0.5)).unwrap();
        let straddling = Domain::new(Vector::filled(2, 0.5), Vector::filled(2, 1.5)).unwrap();
        let outside = Domain::new(Vector::filled(2, 2.0), Vector::filled(2, 3.0)).unwrap();

        assert_eq!(c.frustum_domain(&f, &inner).unwrap(), Containment::Contains);
        assert_eq!(c.frustum_domain(&f, &straddling).unwrap(), Containment::Intersects);
        assert_eq!(c.frustum_domain(&f, &outside).unwrap(), Containment::Disjoint);
    }

    #[test]
    fn test_frustum_sphere() {
        let c = Collision::default();
        let f = square_frustum();
        let sphere = |x: f64, r: f64| Sphere::new(Vector::vector2(x, 0.0), r).unwrap();

        assert_eq!(c.frustum_sphere(&f, &sphere(0.0, 0.5)).unwrap(), Containment::Contains);
        assert_eq!(c.frustum_sphere(&f, &sphere(1.0, 0.5)).unwrap(), Containment::Intersects);
        assert_eq!(c.frustum_sphere(&f, &sphere(3.0, 0.5)).unwrap(), Containment::Disjoint);
        assert!(c.frustum_sphere(&f, &Sphere::new(Vector::zeros(3), 1.0).unwrap()).is_err());
    }
}
