//! Dense matrix of `f64` values
//!
//! Elements are addressed as `(column, row)`. Vectors are treated as row
//! vectors, so `transform` computes `v · M` and a translation lives in the
//! last row of a homogeneous matrix.

use std::fmt;
use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::Tolerance;
use crate::math::Vector;

/// Rectangular matrix stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixFields")]
pub struct Matrix {
    column_count: usize,
    row_count: usize,
    data: Vec<f64>,
}

/// Unchecked serialized form; `data` must hold `column_count * row_count` values
#[derive(Deserialize)]
#[serde(rename = "Matrix")]
struct MatrixFields {
    column_count: usize,
    row_count: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixFields> for Matrix {
    type Error = GeometryError;

    fn try_from(fields: MatrixFields) -> GeometryResult<Self> {
        Self::from_row_slice(fields.column_count, fields.row_count, &fields.data)
    }
}

impl Matrix {
    /// Build a matrix by evaluating `factory(column, row)` for every element
    pub fn new(
        column_count: usize,
        row_count: usize,
        mut factory: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let mut data = Vec::with_capacity(column_count * row_count);
        for row in 0..row_count {
            for column in 0..column_count {
                data.push(factory(column, row));
            }
        }
        Self { column_count, row_count, data }
    }

    /// All-zero matrix
    pub fn zeros(column_count: usize, row_count: usize) -> Self {
        Self { column_count, row_count, data: vec![0.0; column_count * row_count] }
    }

    /// Square identity matrix
    pub fn identity(size: usize) -> Self {
        Self::new(size, size, |column, row| if column == row { 1.0 } else { 0.0 })
    }

    /// Matrix from row-major values
    pub fn from_row_slice(
        column_count: usize,
        row_count: usize,
        values: &[f64],
    ) -> GeometryResult<Self> {
        GeometryError::check_dimension(column_count * row_count, values.len())?;
        Ok(Self { column_count, row_count, data: values.to_vec() })
    }

    /// Matrix whose rows are the given vectors
    pub fn from_rows(rows: &[Vector]) -> GeometryResult<Self> {
        let first = rows.first().ok_or_else(|| {
            GeometryError::InvalidArgument("matrix needs at least one row".to_string())
        })?;
        let column_count = first.len();
        let mut data = Vec::with_capacity(column_count * rows.len());
        for row in rows {
            GeometryError::check_dimension(column_count, row.len())?;
            data.extend_from_slice(row.as_slice());
        }
        Ok(Self { column_count, row_count: rows.len(), data })
    }

    /// Matrix whose columns are the given vectors
    pub fn from_columns(columns: &[Vector]) -> GeometryResult<Self> {
        Ok(Self::from_rows(columns)?.transpose())
    }

    /// Number of columns
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the matrix has as many rows as columns
    pub const fn is_square(&self) -> bool {
        self.column_count == self.row_count
    }

    /// Elements in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    const fn offset(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.column_count && row < self.row_count {
            Some(row * self.column_count + column)
        } else {
            None
        }
    }

    /// Element at `(column, row)`, or `None` when out of range
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        self.offset(column, row).map(|i| self.data[i])
    }

    /// Element at `(column, row)`
    pub fn element(&self, column: usize, row: usize) -> GeometryResult<f64> {
        self.get(column, row).ok_or_else(|| self.out_of_bounds(column, row))
    }

    /// Overwrite the element at `(column, row)`
    pub fn set(&mut self, column: usize, row: usize, value: f64) -> GeometryResult<()> {
        let i = self
            .offset(column, row)
            .ok_or_else(|| self.out_of_bounds(column, row))?;
        self.data[i] = value;
        Ok(())
    }

    fn out_of_bounds(&self, column: usize, row: usize) -> GeometryError {
        if column >= self.column_count {
            GeometryError::IndexOutOfBounds { index: column, len: self.column_count }
        } else {
            GeometryError::IndexOutOfBounds { index: row, len: self.row_count }
        }
    }

    /// Copy of row `row`
    pub fn row(&self, row: usize) -> GeometryResult<Vector> {
        if row >= self.row_count {
            return Err(GeometryError::IndexOutOfBounds { index: row, len: self.row_count });
        }
        let start = row * self.column_count;
        Ok(Vector::from_slice(&self.data[start..start + self.column_count]))
    }

    /// Copy of column `column`
    pub fn column(&self, column: usize) -> GeometryResult<Vector> {
        if column >= self.column_count {
            return Err(GeometryError::IndexOutOfBounds {
                index: column,
                len: self.column_count,
            });
        }
        Ok((0..self.row_count)
            .map(|row| self.data[row * self.column_count + column])
            .collect())
    }

    /// Iterate over copies of the rows
    pub fn rows(&self) -> impl Iterator<Item = Vector> + '_ {
        self.data
            .chunks(self.column_count.max(1))
            .take(self.row_count)
            .map(Vector::from_slice)
    }

    /// Iterate over copies of the columns
    pub fn columns(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.column_count).map(move |column| {
            (0..self.row_count)
                .map(|row| self.data[row * self.column_count + column])
                .collect()
        })
    }

    fn check_same_shape(&self, other: &Self) -> GeometryResult<()> {
        GeometryError::check_dimension(self.column_count, other.column_count)?;
        GeometryError::check_dimension(self.row_count, other.row_count)
    }

    fn map(&self, f: impl FnMut(&f64) -> f64) -> Self {
        Self {
            column_count: self.column_count,
            row_count: self.row_count,
            data: self.data.iter().map(f).collect(),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> GeometryResult<Self> {
        self.check_same_shape(other)?;
        Ok(Self {
            column_count: self.column_count,
            row_count: self.row_count,
            data: self.data.iter().zip(&other.data).map(|(a, b)| f(*a, *b)).collect(),
        })
    }

    /// Element-wise sum
    pub fn add(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference
    pub fn sub(&self, other: &Self) -> GeometryResult<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Add `scalar` to every element
    pub fn add_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a + scalar)
    }

    /// Subtract `scalar` from every element
    pub fn sub_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a - scalar)
    }

    /// Multiply every element by `scalar`
    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }

    /// Matrix product `self · other`
    ///
    /// Requires `self.column_count() == other.row_count()`.
    pub fn multiply(&self, other: &Self) -> GeometryResult<Self> {
        GeometryError::check_dimension(self.column_count, other.row_count)?;
        Ok(Self::new(other.column_count, self.row_count, |column, row| {
            (0..self.column_count)
                .map(|k| {
                    self.data[row * self.column_count + k]
                        * other.data[k * other.column_count + column]
                })
                .sum()
        }))
    }

    /// Row vector times matrix: `v · M`
    ///
    /// `v` must have `row_count` components; the result has `column_count`.
    pub fn transform(&self, v: &Vector) -> GeometryResult<Vector> {
        GeometryError::check_dimension(self.row_count, v.len())?;
        Ok((0..self.column_count)
            .map(|column| {
                v.iter()
                    .enumerate()
                    .map(|(row, x)| x * self.data[row * self.column_count + column])
                    .sum()
            })
            .collect())
    }

    /// Transform a point of dimension `D` by a `(D+1)×(D+1)` homogeneous matrix
    ///
    /// The point is extended with `w = 1` and the result is divided by the
    /// output `w`. Fails with [`GeometryError::NumericDegenerate`] when `w` is
    /// within `tolerance` of zero.
    pub fn transform_point(
        &self,
        point: &Vector,
        tolerance: &Tolerance,
    ) -> GeometryResult<Vector> {
        let extended = self.homogeneous_operand(point, 1.0)?;
        let mut result = self.transform(&extended)?.to_vec();
        let w = result.pop().unwrap_or(1.0);
        if tolerance.is_zero(w) {
            return Err(GeometryError::NumericDegenerate(format!(
                "point maps to infinity (w = {w})"
            )));
        }
        if w == 1.0 {
            Ok(Vector::new(result))
        } else {
            Ok(Vector::new(result).divide(w))
        }
    }

    /// Transform a direction of dimension `D` by a `(D+1)×(D+1)` homogeneous
    /// matrix, ignoring translation
    pub fn transform_direction(&self, direction: &Vector) -> GeometryResult<Vector> {
        let extended = self.homogeneous_operand(direction, 0.0)?;
        let mut result = self.transform(&extended)?.to_vec();
        result.pop();
        Ok(Vector::new(result))
    }

    fn homogeneous_operand(&self, v: &Vector, w: f64) -> GeometryResult<Vector> {
        if !self.is_square() {
            return Err(GeometryError::InvalidArgument(format!(
                "homogeneous transform needs a square matrix, got {}x{}",
                self.column_count, self.row_count
            )));
        }
        GeometryError::check_dimension(self.row_count, v.len() + 1)?;
        Ok(v.iter().copied().chain(std::iter::once(w)).collect())
    }

    /// Transposed copy
    pub fn transpose(&self) -> Self {
        Self::new(self.row_count, self.column_count, |column, row| {
            self.data[column * self.column_count + row]
        })
    }

    fn require_square(&self, operation: &str) -> GeometryResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(GeometryError::InvalidArgument(format!(
                "{operation} needs a square matrix, got {}x{}",
                self.column_count, self.row_count
            )))
        }
    }

    /// Determinant of a square matrix
    pub fn determinant(&self) -> GeometryResult<f64> {
        self.require_square("determinant")?;
        Ok(self.to_nalgebra().determinant())
    }

    /// Inverse of a square matrix
    ///
    /// Fails with [`GeometryError::NumericDegenerate`] when the determinant is
    /// within `tolerance` of zero.
    pub fn inverse(&self, tolerance: &Tolerance) -> GeometryResult<Self> {
        self.require_square("inverse")?;
        let lu = self.to_nalgebra().lu();
        let determinant = lu.determinant();
        if tolerance.is_zero(determinant) {
            return Err(GeometryError::NumericDegenerate(format!(
                "matrix is singular (determinant {determinant})"
            )));
        }
        lu.try_inverse()
            .map(|inverse| Self::from_nalgebra(&inverse))
            .ok_or_else(|| GeometryError::NumericDegenerate("matrix is singular".to_string()))
    }

    /// Copy into an nalgebra matrix (rows and columns keep their meaning)
    pub fn to_nalgebra(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.row_count, self.column_count, &self.data)
    }

    /// Copy from an nalgebra matrix
    pub fn from_nalgebra(matrix: &DMatrix<f64>) -> Self {
        Self::new(matrix.ncols(), matrix.nrows(), |column, row| matrix[(row, column)])
    }

    /// Tolerance-based equality over same-shaped matrices
    pub fn approx_eq(&self, other: &Self, tolerance: &Tolerance) -> bool {
        self.column_count == other.column_count
            && self.row_count == other.row_count
            && self.data.iter().zip(&other.data).all(|(a, b)| tolerance.eq(*a, *b))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// Panics when `(column, row)` is out of range; use [`Matrix::get`] to check
    fn index(&self, (column, row): (usize, usize)) -> &Self::Output {
        assert!(
            column < self.column_count && row < self.row_count,
            "matrix index ({column}, {row}) out of range for {}x{}",
            self.column_count,
            self.row_count
        );
        &self.data[row * self.column_count + column]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (column, row): (usize, usize)) -> &mut Self::Output {
        assert!(
            column < self.column_count && row < self.row_count,
            "matrix index ({column}, {row}) out of range for {}x{}",
            self.column_count,
            self.row_count
        );
        &mut self.data[row * self.column_count + column]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{row:.precision$}")?,
                None => write!(f, "{row}")?,
            }
        }
        f.write_str("]")
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::from_nalgebra(&matrix)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.column_count == other.column_count
            && self.row_count == other.row_count
            && self.data.iter().zip(&other.data).all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.column_count == other.column_count
            && self.row_count == other.row_count
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
