//! Homogeneous transform constructors
//!
//! All matrices follow the row-vector convention used by
//! [`Matrix::transform_point`]: `p' = p · M`, translation in the last row.
//! Coordinates are right-handed and projection maps depth to `[-1, 1]`.

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::Tolerance;
use crate::math::{Matrix, Vector};

impl Matrix {
    fn homogeneous3(block: [[f64; 3]; 3]) -> Self {
        Self::new(4, 4, |column, row| match (column, row) {
            (0..=2, 0..=2) => block[row][column],
            (3, 3) => 1.0,
            _ => 0.0,
        })
    }

    /// Rotation of `angle` radians about a 3-D `axis`
    ///
    /// The axis is normalized first, so it need not be unit length.
    pub fn rotate(axis: &Vector, angle: f64, tolerance: &Tolerance) -> GeometryResult<Self> {
        GeometryError::check_dimension(3, axis.len())?;
        let axis = axis.normalize(tolerance)?;
        let (x, y, z) = (axis[0], axis[1], axis[2]);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        Ok(Self::homogeneous3([
            [c + x * x * t, x * y * t + z * s, x * z * t - y * s],
            [x * y * t - z * s, c + y * y * t, y * z * t + x * s],
            [x * z * t + y * s, y * z * t - x * s, c + z * z * t],
        ]))
    }

    /// Rotation from a quaternion `(x, y, z, w)`
    ///
    /// The quaternion is normalized first.
    pub fn rotate_quaternion(
        quaternion: &Vector,
        tolerance: &Tolerance,
    ) -> GeometryResult<Self> {
        GeometryError::check_dimension(4, quaternion.len())?;
        let q = quaternion.normalize(tolerance)?;
        let (x, y, z, w) = (q[0], q[1], q[2], q[3]);

        Ok(Self::homogeneous3([
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y + z * w),
                2.0 * (x * z - y * w),
            ],
            [
                2.0 * (x * y - z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z + x * w),
            ],
            [
                2.0 * (x * z + y * w),
                2.0 * (y * z - x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]))
    }

    /// Non-uniform scale: a `(D+1)` square diagonal matrix with a trailing 1
    pub fn scale_by(factors: &Vector) -> Self {
        let size = factors.len() + 1;
        Self::new(size, size, |column, row| {
            if column == row {
                factors.get(column).unwrap_or(1.0)
            } else {
                0.0
            }
        })
    }

    /// Translation: `(D+1)` identity with `offset` in the last row
    pub fn translate(offset: &Vector) -> Self {
        let size = offset.len() + 1;
        Self::new(size, size, |column, row| {
            if row == size - 1 && column < size - 1 {
                offset[column]
            } else if column == row {
                1.0
            } else {
                0.0
            }
        })
    }

    /// World-to-camera matrix for a camera at `position` looking along
    /// `forward`
    ///
    /// The camera looks down its local -Z axis with `upward` roughly along
    /// +Y. Fails with [`GeometryError::NumericDegenerate`] when `forward` is
    /// zero or parallel to `upward`.
    pub fn view(
        position: &Vector,
        forward: &Vector,
        upward: &Vector,
        tolerance: &Tolerance,
    ) -> GeometryResult<Self> {
        GeometryError::check_dimension(3, position.len())?;
        GeometryError::check_dimension(3, forward.len())?;
        GeometryError::check_dimension(3, upward.len())?;

        let z_axis = -forward.normalize(tolerance)?;
        let x_axis = upward.cross(&z_axis)?.normalize(tolerance).map_err(|_| {
            GeometryError::NumericDegenerate(
                "view forward and upward directions are parallel".to_string(),
            )
        })?;
        let y_axis = z_axis.cross(&x_axis)?;

        let axes = [&x_axis, &y_axis, &z_axis];
        let mut m = Self::identity(4);
        for (column, axis) in axes.iter().enumerate() {
            for row in 0..3 {
                m[(column, row)] = axis[row];
            }
            m[(column, 3)] = -axis.dot(position)?;
        }
        Ok(m)
    }

    /// Perspective projection from the size of the near plane and the
    /// near/far distances
    ///
    /// Maps view-space depth `-front_distance` to -1 and `-back_distance` to 1.
    pub fn perspective(
        front_width: f64,
        front_height: f64,
        front_distance: f64,
        back_distance: f64,
    ) -> GeometryResult<Self> {
        let valid = front_width.is_finite()
            && front_height.is_finite()
            && back_distance.is_finite()
            && front_width > 0.0
            && front_height > 0.0
            && front_distance > 0.0
            && front_distance < back_distance;
        if !valid {
            return Err(GeometryError::InvalidArgument(format!(
                "perspective needs positive size and 0 < near < far, got \
                 {front_width}x{front_height}, near {front_distance}, far {back_distance}"
            )));
        }

        let (n, f) = (front_distance, back_distance);
        let depth = f - n;
        let mut m = Self::zeros(4, 4);
        m[(0, 0)] = 2.0 * n / front_width;
        m[(1, 1)] = 2.0 * n / front_height;
        m[(2, 2)] = -(f + n) / depth;
        m[(3, 2)] = -1.0;
        m[(2, 3)] = -2.0 * f * n / depth;
        Ok(m)
    }
}

impl Vector {
    /// Quaternion `(x, y, z, w)` for a rotation of `angle` radians about `axis`
    pub fn quaternion_from_axis_angle(
        axis: &Self,
        angle: f64,
        tolerance: &Tolerance,
    ) -> GeometryResult<Self> {
        GeometryError::check_dimension(3, axis.len())?;
        let axis = axis.normalize(tolerance)?;
        let (s, c) = (angle * 0.5).sin_cos();
        Ok(Self::vector4(axis[0] * s, axis[1] * s, axis[2] * s, c))
    }
}
