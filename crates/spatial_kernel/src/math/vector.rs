//! Variable-dimension vector type
//!
//! [`Vector`] is the single vector abstraction of the kernel. Fixed-dimension
//! helpers such as [`Vector::vector3`] are plain factories over the same type.
//!
//! Binary operations between two vectors check lengths and fail with
//! [`GeometryError::DimensionMismatch`] instead of truncating.

use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::math::utils::lerp;
use crate::foundation::Tolerance;

/// Ordered, fixed-length sequence of `f64` components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: DVector<f64>,
}

impl Vector {
    /// Create a vector from its components
    pub fn new(values: Vec<f64>) -> Self {
        Self { data: DVector::from_vec(values) }
    }

    /// Create a vector of `len` zeros
    pub fn zeros(len: usize) -> Self {
        Self { data: DVector::zeros(len) }
    }

    /// Create a vector of `len` copies of `value`
    pub fn filled(len: usize, value: f64) -> Self {
        Self { data: DVector::from_element(len, value) }
    }

    /// Create a vector by copying a slice
    pub fn from_slice(values: &[f64]) -> Self {
        Self { data: DVector::from_column_slice(values) }
    }

    /// Unit vector of dimension `len` along `axis`
    pub fn unit(len: usize, axis: usize) -> GeometryResult<Self> {
        if axis >= len {
            return Err(GeometryError::IndexOutOfBounds { index: axis, len });
        }
        let mut v = Self::zeros(len);
        v.data[axis] = 1.0;
        Ok(v)
    }

    /// 2-dimensional vector
    pub fn vector2(x: f64, y: f64) -> Self {
        Self::new(vec![x, y])
    }

    /// 3-dimensional vector
    pub fn vector3(x: f64, y: f64, z: f64) -> Self {
        Self::new(vec![x, y, z])
    }

    /// 4-dimensional vector
    pub fn vector4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new(vec![x, y, z, w])
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for the zero-dimensional vector
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Component at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Component at `index`
    pub fn component(&self, index: usize) -> GeometryResult<f64> {
        self.get(index)
            .ok_or(GeometryError::IndexOutOfBounds { index, len: self.len() })
    }

    /// Overwrite the component at `index`
    pub fn set(&mut self, index: usize, value: f64) -> GeometryResult<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Iterate over the components
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.data.iter()
    }

    /// Components as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Copy the components into a `Vec`
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.as_slice().to_vec()
    }

    /// Borrow the backing nalgebra vector
    pub fn inner(&self) -> &DVector<f64> {
        &self.data
    }

    fn check_same_len(&self, other: &Self) -> GeometryResult<()> {
        GeometryError::check_dimension(self.len(), other.len())
    }

    fn zip_with(&self, other: &Self, f: impl FnMut(f64, f64) -> f64) -> GeometryResult<Self> {
        self.check_same_len(other)?;
        Ok(Self { data: self.data.zip_map(&other.data, f) })
    }

    fn map(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self { data: self.data.map(f) }
    }

    /// Component-wise sum
    pub fn add(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference
    pub fn sub(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise product
    pub fn mul(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Component-wise quotient
    pub fn div(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Component-wise remainder (sign follows the dividend)
    pub fn rem(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a % b)
    }

    /// Add `scalar` to every component
    pub fn add_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a + scalar)
    }

    /// Subtract `scalar` from every component
    pub fn sub_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a - scalar)
    }

    /// Multiply every component by `scalar`
    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }

    /// Divide every component by `scalar`
    pub fn divide(&self, scalar: f64) -> Self {
        self.map(|a| a / scalar)
    }

    /// Remainder of every component by `scalar`
    pub fn rem_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a % scalar)
    }

    /// Component-wise minimum
    pub fn min(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, f64::min)
    }

    /// Component-wise maximum
    pub fn max(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, f64::max)
    }

    /// Component-wise absolute value
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Sum of the components
    pub fn sum(&self) -> f64 {
        self.data.sum()
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> GeometryResult<f64> {
        self.check_same_len(other)?;
        Ok(self.data.dot(&other.data))
    }

    /// Cross product, defined for 3-dimensional vectors only
    pub fn cross(&self, other: &Self) -> GeometryResult<Self> {
        GeometryError::check_dimension(3, self.len())?;
        GeometryError::check_dimension(3, other.len())?;
        let (ax, ay, az) = (self.data[0], self.data[1], self.data[2]);
        let (bx, by, bz) = (other.data[0], other.data[1], other.data[2]);
        Ok(Self::vector3(
            ay * bz - az * by,
            az * bx - ax * bz,
            ax * by - ay * bx,
        ))
    }

    /// Euclidean norm
    pub fn length(&self) -> f64 {
        self.data.norm()
    }

    /// Squared Euclidean norm
    pub fn length_squared(&self) -> f64 {
        self.data.norm_squared()
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Self) -> GeometryResult<f64> {
        Ok(self.distance_squared(other)?.sqrt())
    }

    /// Squared Euclidean distance to `other`
    pub fn distance_squared(&self, other: &Self) -> GeometryResult<f64> {
        Ok(self.sub(other)?.length_squared())
    }

    /// Unit vector in the same direction
    ///
    /// Fails with [`GeometryError::NumericDegenerate`] when the length is
    /// within `tolerance` of zero.
    pub fn normalize(&self, tolerance: &Tolerance) -> GeometryResult<Self> {
        let length = self.length();
        if tolerance.is_zero(length) {
            return Err(GeometryError::NumericDegenerate(format!(
                "cannot normalize vector of length {length}"
            )));
        }
        Ok(self.divide(length))
    }

    /// `left + (right - left) * t` with a scalar `t`
    ///
    /// Exact at `t = 0` (returns `left`) and `t = 1` (returns `right`).
    pub fn interpolate(left: &Self, right: &Self, t: f64) -> GeometryResult<Self> {
        left.zip_with(right, |a, b| lerp(a, b, t))
    }

    /// `left + (right - left) * t` with one `t` per component
    pub fn interpolate_each(left: &Self, right: &Self, t: &Self) -> GeometryResult<Self> {
        left.check_same_len(right)?;
        left.check_same_len(t)?;
        Ok(left
            .iter()
            .zip(right.iter())
            .zip(t.iter())
            .map(|((a, b), t)| lerp(*a, *b, *t))
            .collect())
    }

    /// Tolerance-based equality: same length and `|aᵢ - bᵢ| <= ε` for all `i`
    pub fn approx_eq(&self, other: &Self, tolerance: &Tolerance) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| tolerance.eq(*a, *b))
    }

    /// Render as `"[x, y, z]"`, with a fixed number of decimals when given
    pub fn format(&self, precision: Option<usize>) -> String {
        match precision {
            Some(precision) => format!("{self:.precision$}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{value:.precision$}")?,
                None => write!(f, "{value}")?,
            }
        }
        f.write_str("]")
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { data: -self.data }
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector { data: -&self.data }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(values: [f64; N]) -> Self {
        Self::from_slice(&values)
    }
}

impl From<DVector<f64>> for Vector {
    fn from(data: DVector<f64>) -> Self {
        Self { data }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dimension_mismatch(expected: usize, actual: usize) -> GeometryError {
        GeometryError::DimensionMismatch { expected, actual }
    }

    #[test]
    fn test_construction_and_access() {
        let mut v = Vector::vector3(1.0, 2.0, 3.0);
        assert_eq!(v.len(), 3);
        assert_eq!(v[1], 2.0);
        assert_eq!(v.get(3), None);
        assert_eq!(
            v.component(5),
            Err(GeometryError::IndexOutOfBounds { index: 5, len: 3 })
        );

        v.set(0, 7.0).unwrap();
        assert_eq!(v.as_slice(), &[7.0, 2.0, 3.0]);
        assert!(v.set(3, 1.0).is_err());
        assert_eq!(v.as_slice(), &[7.0, 2.0, 3.0]);

        assert_eq!(Vector::zeros(2), Vector::vector2(0.0, 0.0));
        assert_eq!(Vector::filled(2, 4.0), Vector::from([4.0, 4.0]));
        assert_eq!(Vector::unit(3, 2).unwrap(), Vector::vector3(0.0, 0.0, 1.0));
        assert!(Vector::unit(3, 3).is_err());
    }

    #[test]
    fn test_component_wise_arithmetic() {
        let a = Vector::vector3(6.0, 8.0, -7.0);
        let b = Vector::vector3(2.0, 3.0, 2.0);

        assert_eq!(a.add(&b).unwrap(), Vector::vector3(8.0, 11.0, -5.0));
        assert_eq!(a.sub(&b).unwrap(), Vector::vector3(4.0, 5.0, -9.0));
        assert_eq!(a.mul(&b).unwrap(), Vector::vector3(12.0, 24.0, -14.0));
        assert_eq!(a.div(&b).unwrap(), Vector::vector3(3.0, 8.0 / 3.0, -3.5));
        assert_eq!(a.rem(&b).unwrap(), Vector::vector3(0.0, 2.0, -1.0));
    }

    #[test]
    fn test_scalar_arithmetic() {
        let v = Vector::vector2(3.0, -4.5);
        assert_eq!(v.scale(2.0), Vector::vector2(6.0, -9.0));
        assert_eq!(v.divide(2.0), Vector::vector2(1.5, -2.25));
        assert_eq!(v.add_scalar(1.0), Vector::vector2(4.0, -3.5));
        assert_eq!(v.sub_scalar(1.0), Vector::vector2(2.0, -5.5));
        assert_eq!(v.rem_scalar(2.0), Vector::vector2(1.0, -0.5));
        assert_eq!(-&v, Vector::vector2(-3.0, 4.5));
        assert_eq!(v.abs(), Vector::vector2(3.0, 4.5));
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let a = Vector::vector3(1.0, 2.0, 3.0);
        let b = Vector::vector2(1.0, 2.0);

        assert_eq!(a.add(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(a.sub(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(a.mul(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(a.div(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(a.rem(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(a.dot(&b), Err(dimension_mismatch(3, 2)));
        assert_eq!(b.min(&a), Err(dimension_mismatch(2, 3)));
        assert!(Vector::interpolate(&a, &b, 0.5).is_err());
        assert!(Vector::interpolate_each(&a, &a, &b).is_err());
    }

    #[test]
    fn test_length_and_distance() {
        let v = Vector::vector2(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.distance(&Vector::zeros(2)).unwrap(), 5.0);
        assert_eq!(v.dot(&Vector::vector2(2.0, 1.0)).unwrap(), 10.0);
    }

    #[test]
    fn test_normalize() {
        let tolerance = Tolerance::default();
        let n = Vector::vector3(0.0, 3.0, 4.0).normalize(&tolerance).unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n, Vector::vector3(0.0, 0.6, 0.8), epsilon = 1e-12);

        let degenerate = Vector::vector3(1e-12, 0.0, 0.0).normalize(&tolerance);
        assert!(matches!(degenerate, Err(GeometryError::NumericDegenerate(_))));
        assert!(Vector::zeros(4).normalize(&Tolerance::EXACT).is_err());
    }

    #[test]
    fn test_cross_product() {
        let x = Vector::vector3(1.0, 0.0, 0.0);
        let y = Vector::vector3(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y).unwrap(), Vector::vector3(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x).unwrap(), Vector::vector3(0.0, 0.0, -1.0));

        let planar = Vector::vector2(1.0, 0.0);
        assert_eq!(planar.cross(&planar), Err(dimension_mismatch(3, 2)));
        assert_eq!(x.cross(&Vector::vector4(0.0, 0.0, 0.0, 1.0)), Err(dimension_mismatch(3, 4)));
    }

    #[test]
    fn test_interpolation_endpoints_are_exact() {
        let a = Vector::vector3(0.1, -3.7, 1e10);
        let b = Vector::vector3(0.7, 2.2, -1e-10);

        assert_eq!(Vector::interpolate(&a, &b, 0.0).unwrap(), a);
        assert_eq!(Vector::interpolate(&a, &b, 1.0).unwrap(), b);
        assert_relative_eq!(
            Vector::interpolate(&a, &b, 0.5).unwrap(),
            Vector::vector3(0.4, -0.75, 5e9),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_interpolate_each_component() {
        let a = Vector::vector2(0.0, 10.0);
        let b = Vector::vector2(4.0, 20.0);
        let t = Vector::vector2(0.25, 1.0);
        assert_eq!(
            Vector::interpolate_each(&a, &b, &t).unwrap(),
            Vector::vector2(1.0, 20.0)
        );
    }

    #[test]
    fn test_equality_modes() {
        let a = Vector::vector2(1.0, 2.0);
        let b = Vector::vector2(1.0, 2.0 + 1e-12);

        assert_ne!(a, b);
        assert!(a.approx_eq(&b, &Tolerance::default()));
        assert!(!a.approx_eq(&b, &Tolerance::EXACT));
        assert!(!a.approx_eq(&Vector::vector3(1.0, 2.0, 0.0), &Tolerance::default()));
        assert_ne!(a, Vector::vector3(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_formatting() {
        let v = Vector::vector3(1.0, 2.5, -3.0);
        assert_eq!(v.to_string(), "[1, 2.5, -3]");
        assert_eq!(format!("{v:.2}"), "[1.00, 2.50, -3.00]");
        assert_eq!(v.format(Some(1)), "[1.0, 2.5, -3.0]");
        assert_eq!(v.format(None), "[1, 2.5, -3]");
        assert_eq!(Vector::zeros(0).to_string(), "[]");
    }
}
