//! Intersection and containment tests between geometric primitives
//!
//! All tests go through a [`Collision`] context that carries the
//! [`Tolerance`] used to band plane classifications. Build it once from the
//! application's configuration and pass it where queries are made.
//!
//! # Conventions
//!
//! - Signed distance to a plane is `s = dot(normal, p) + d`.
//! - `s > ε` is [`PlaneSide::Front`], `s < -ε` is [`PlaneSide::Back`],
//!   anything in between (including tangency) is [`PlaneSide::Intersecting`].
//! - [`Collision::contains`] is a strict interior test; boundary points of a
//!   box are outside. Spatial tree traversal uses the inclusive
//!   [`Domain::contains_point`](crate::geometry::Domain::contains_point).
//! - "No hit" is an ordinary return value. Errors are reserved for
//!   dimension mismatches and invalid input.

mod plane;
mod volume;

use serde::{Deserialize, Serialize};

use crate::foundation::Tolerance;

/// Which side of a plane an object lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneSide {
    /// Entirely on the side the normal points to
    Front,
    /// Entirely on the opposite side
    Back,
    /// Straddling or touching the plane
    Intersecting,
}

/// Relation of an object to an enclosing volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Containment {
    /// No overlap
    Disjoint,
    /// Fully inside
    Contains,
    /// Partial overlap
    Intersects,
}

/// Tolerance-carrying context for collision queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    tolerance: Tolerance,
}

impl Collision {
    /// Create a context using `tolerance` for plane classification
    pub const fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// The tolerance used by this context
    pub const fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    fn classify(&self, signed_distance: f64, radius: f64) -> PlaneSide {
        let band = radius + self.tolerance.epsilon();
        if signed_distance > band {
            PlaneSide::Front
        } else if signed_distance < -band {
            PlaneSide::Back
        } else {
            PlaneSide::Intersecting
        }
    }

    fn combine(sides: impl IntoIterator<Item = PlaneSide>) -> Containment {
        let mut all_front = true;
        for side in sides {
            match side {
                PlaneSide::Back => return Containment::Disjoint,
                PlaneSide::Intersecting => all_front = false,
                PlaneSide::Front => {}
            }
        }
        if all_front {
            Containment::Contains
        } else {
            Containment::Intersects
        }
    }
}
