//! Half-line with an origin and direction

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::Tolerance;
use crate::math::Vector;

/// Ray `position + t · direction`, `t >= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RayFields")]
pub struct Ray {
    position: Vector,
    direction: Vector,
}

#[derive(Deserialize)]
#[serde(rename = "Ray")]
struct RayFields {
    position: Vector,
    direction: Vector,
}

impl TryFrom<RayFields> for Ray {
    type Error = GeometryError;

    fn try_from(fields: RayFields) -> GeometryResult<Self> {
        Self::new(fields.position, fields.direction)
    }
}

impl Ray {
    /// Create a ray; the direction is used as given
    pub fn new(position: Vector, direction: Vector) -> GeometryResult<Self> {
        GeometryError::check_dimension(position.len(), direction.len())?;
        Ok(Self { position, direction })
    }

    /// Ray starting at `from` with a unit direction pointing at `to`
    pub fn through(from: &Vector, to: &Vector, tolerance: &Tolerance) -> GeometryResult<Self> {
        let direction = to.sub(from)?.normalize(tolerance)?;
        Ok(Self { position: from.clone(), direction })
    }

    /// Origin
    pub const fn position(&self) -> &Vector {
        &self.position
    }

    /// Direction
    pub const fn direction(&self) -> &Vector {
        &self.direction
    }

    /// Number of axes
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// `position + t · direction`
    pub fn point_at(&self, t: f64) -> Vector {
        self.position
            .iter()
            .zip(self.direction.iter())
            .map(|(p, d)| d.mul_add(t, *p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deserialize_checks_dimension() {
        let ray = Ray::new(Vector::zeros(2), Vector::vector2(1.0, 0.0)).unwrap();
        let text = ron::to_string(&ray).unwrap();
        assert_eq!(ron::from_str::<Ray>(&text).unwrap(), ray);

        let position = ron::to_string(&Vector::zeros(3)).unwrap();
        let direction = ron::to_string(ray.direction()).unwrap();
        let mixed = format!("(position: {position}, direction: {direction})");
        assert!(ron::from_str::<Ray>(&mixed).is_err());
    }

    #[test]
    fn test_new_keeps_direction() {
        let ray = Ray::new(Vector::zeros(2), Vector::vector2(3.0, 0.0)).unwrap();
        assert_eq!(ray.point_at(2.0), Vector::vector2(6.0, 0.0));
        assert!(Ray::new(Vector::zeros(2), Vector::zeros(3)).is_err());
    }

    #[test]
    fn test_through_normalizes() {
        let tolerance = Tolerance::default();
        let ray = Ray::through(&Vector::vector2(1.0, 1.0), &Vector::vector2(4.0, 5.0), &tolerance)
            .unwrap();
        assert_relative_eq!(ray.direction().length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.point_at(5.0), Vector::vector2(4.0, 5.0), epsilon = 1e-12);

        let same = Vector::vector2(1.0, 1.0);
        assert!(Ray::through(&same, &same, &tolerance).is_err());
    }
}
