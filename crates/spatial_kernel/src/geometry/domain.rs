//! Axis-aligned hyperrectangle

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::math::utils::lerp;
use crate::math::Vector;

/// Axis-aligned box in any dimension, bounded by a minimum and maximum corner
///
/// `Domain::new` only checks that both corners have the same dimension. Use
/// [`Domain::from_corners`] when the corner order is not known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainFields")]
pub struct Domain {
    minimum: Vector,
    maximum: Vector,
}

#[derive(Deserialize)]
#[serde(rename = "Domain")]
struct DomainFields {
    minimum: Vector,
    maximum: Vector,
}

impl TryFrom<DomainFields> for Domain {
    type Error = GeometryError;

    fn try_from(fields: DomainFields) -> GeometryResult<Self> {
        Self::new(fields.minimum, fields.maximum)
    }
}

/// Axis-aligned bounding box
pub type Aabb = Domain;

impl Domain {
    /// Create a domain from its minimum and maximum corners
    pub fn new(minimum: Vector, maximum: Vector) -> GeometryResult<Self> {
        GeometryError::check_dimension(minimum.len(), maximum.len())?;
        Ok(Self { minimum, maximum })
    }

    /// Corners the caller has already built with equal dimension
    pub(crate) const fn from_ordered_corners(minimum: Vector, maximum: Vector) -> Self {
        Self { minimum, maximum }
    }

    /// Create a domain spanning two arbitrary opposite corners
    pub fn from_corners(a: &Vector, b: &Vector) -> GeometryResult<Self> {
        Ok(Self { minimum: a.min(b)?, maximum: a.max(b)? })
    }

    /// Create a domain centered at `center` with half-sizes `extents`
    pub fn from_center_extents(center: &Vector, extents: &Vector) -> GeometryResult<Self> {
        Self::new(center.sub(extents)?, center.add(extents)?)
    }

    /// The unit domain `[0, 1]^dimension`
    pub fn unit(dimension: usize) -> Self {
        Self { minimum: Vector::zeros(dimension), maximum: Vector::filled(dimension, 1.0) }
    }

    /// Minimum corner
    pub const fn minimum(&self) -> &Vector {
        &self.minimum
    }

    /// Maximum corner
    pub const fn maximum(&self) -> &Vector {
        &self.maximum
    }

    /// Number of axes
    pub fn dimension(&self) -> usize {
        self.minimum.len()
    }

    /// True when `minimum <= maximum` on every axis
    pub fn is_ordered(&self) -> bool {
        self.minimum.iter().zip(self.maximum.iter()).all(|(lo, hi)| lo <= hi)
    }

    /// Midpoint of the two corners
    pub fn center(&self) -> Vector {
        self.minimum
            .iter()
            .zip(self.maximum.iter())
            .map(|(lo, hi)| lerp(*lo, *hi, 0.5))
            .collect()
    }

    /// Edge lengths, `maximum - minimum`
    pub fn size(&self) -> Vector {
        self.minimum.iter().zip(self.maximum.iter()).map(|(lo, hi)| hi - lo).collect()
    }

    /// Half edge lengths
    pub fn extents(&self) -> Vector {
        self.size().scale(0.5)
    }

    /// Point at normalized coordinates `t` (0 = minimum, 1 = maximum per axis)
    pub fn interpolate(&self, t: &Vector) -> GeometryResult<Vector> {
        Vector::interpolate_each(&self.minimum, &self.maximum, t)
    }

    /// Sub-box spanning normalized coordinates `lower..upper`
    pub fn sub_domain(&self, lower: &Vector, upper: &Vector) -> GeometryResult<Self> {
        Self::new(self.interpolate(lower)?, self.interpolate(upper)?)
    }

    /// Inclusive point test, `minimum <= p <= maximum` on every axis
    ///
    /// Boundary points count as inside. For the strict interior test see
    /// [`Collision::contains`](crate::collision::Collision::contains).
    pub fn contains_point(&self, point: &Vector) -> GeometryResult<bool> {
        GeometryError::check_dimension(self.dimension(), point.len())?;
        Ok(self
            .minimum
            .iter()
            .zip(self.maximum.iter())
            .zip(point.iter())
            .all(|((lo, hi), p)| lo <= p && p <= hi))
    }

    /// Inclusive overlap test with another domain
    pub fn intersects(&self, other: &Self) -> GeometryResult<bool> {
        GeometryError::check_dimension(self.dimension(), other.dimension())?;
        Ok((0..self.dimension()).all(|axis| {
            self.minimum[axis] <= other.maximum[axis] && self.maximum[axis] >= other.minimum[axis]
        }))
    }

    /// Smallest domain enclosing both
    pub fn union(&self, other: &Self) -> GeometryResult<Self> {
        Ok(Self {
            minimum: self.minimum.min(&other.minimum)?,
            maximum: self.maximum.max(&other.maximum)?,
        })
    }

    /// Corner selected per axis by `pick_maximum(axis)`
    pub(crate) fn corner(&self, mut pick_maximum: impl FnMut(usize) -> bool) -> Vector {
        (0..self.dimension())
            .map(|axis| {
                if pick_maximum(axis) {
                    self.maximum[axis]
                } else {
                    self.minimum[axis]
                }
            })
            .collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.precision$} - {:.precision$}",
                self.minimum, self.maximum
            ),
            None => write!(f, "{} - {}", self.minimum, self.maximum),
        }
    }
}
