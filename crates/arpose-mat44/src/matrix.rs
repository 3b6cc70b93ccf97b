//! 4x4 matrix value type (single precision, column-major).

use serde::{Deserialize, Serialize};

use crate::{checked, ops, Mat44Error, Tolerance};

/// 4x4 homogeneous transform stored as 16 column-major values.
///
/// The entry at `(row, col)` lives at flat index `col * 4 + row`, which is the layout
/// OpenGL-style pipelines expect. The flat array is public so callers can hand the
/// buffer straight to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Matrix44(pub [f32; 16]);

impl Matrix44 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Matrix with all entries set to zero.
    pub const ZERO: Self = Self([0.0; 16]);

    /// Create a new matrix from a column-major array.
    #[inline]
    pub const fn from_cols_array(arr: [f32; 16]) -> Self {
        Self(arr)
    }

    /// Create a new matrix from four columns.
    pub fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        let mut m = Self::ZERO;
        for (c, col) in cols.iter().enumerate() {
            m.0[c * 4..c * 4 + 4].copy_from_slice(col);
        }
        m
    }

    /// Create a new matrix from four rows, as a matrix is usually written on paper.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = Self::ZERO;
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                m.set(r, c, v);
            }
        }
        m
    }

    /// Entry at `(row, col)`.
    ///
    /// PRECONDITION: `row < 4` and `col < 4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[col * 4 + row]
    }

    /// Overwrite the entry at `(row, col)`.
    ///
    /// PRECONDITION: `row < 4` and `col < 4`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.0[col * 4 + row] = value;
    }

    /// Row `r` as `[m(r,0), m(r,1), m(r,2), m(r,3)]`.
    #[inline]
    pub fn row(&self, r: usize) -> [f32; 4] {
        [self.0[r], self.0[4 + r], self.0[8 + r], self.0[12 + r]]
    }

    /// Column `c` as `[m(0,c), m(1,c), m(2,c), m(3,c)]`.
    #[inline]
    pub fn col(&self, c: usize) -> [f32; 4] {
        [self.0[c * 4], self.0[c * 4 + 1], self.0[c * 4 + 2], self.0[c * 4 + 3]]
    }

    /// Copy out the column-major array.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0
    }

    /// Borrow the column-major array.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    /// Mutably borrow the column-major array.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 16] {
        &mut self.0
    }

    /// Translation part of the transform (flat indices 12, 13 and 14).
    #[inline]
    pub fn translation(&self) -> [f32; 3] {
        [self.0[12], self.0[13], self.0[14]]
    }

    /// Returns `true` if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Multiply the matrix by a column vector.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (r, o) in out.iter_mut().enumerate() {
            *o = self.0[r] * v[0]
                + self.0[4 + r] * v[1]
                + self.0[8 + r] * v[2]
                + self.0[12 + r] * v[3];
        }
        out
    }

    /// Transposed copy of the matrix. See [`ops::transpose`].
    #[inline]
    pub fn transpose(&self) -> Self {
        ops::transpose(self)
    }

    /// Determinant of the matrix. See [`ops::determinant`].
    #[inline]
    pub fn determinant(&self) -> f32 {
        ops::determinant(self)
    }

    /// Unchecked inverse. See [`ops::inverse`].
    #[inline]
    pub fn inverse(&self) -> Self {
        ops::inverse(self)
    }

    /// Checked inverse. See [`checked::try_inverse`].
    #[inline]
    pub fn try_inverse(&self, tol: &Tolerance) -> Result<Self, Mat44Error> {
        checked::try_inverse(self, tol)
    }
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Conversions to and from column-major arrays.
impl From<[f32; 16]> for Matrix44 {
    #[inline]
    fn from(arr: [f32; 16]) -> Self {
        Self(arr)
    }
}

impl From<Matrix44> for [f32; 16] {
    #[inline]
    fn from(m: Matrix44) -> Self {
        m.0
    }
}

// glam is column-major as well, so these are plain copies.
impl From<glam::Mat4> for Matrix44 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix44> for glam::Mat4 {
    #[inline]
    fn from(m: Matrix44) -> Self {
        glam::Mat4::from_cols_array(&m.0)
    }
}

// Matrix-matrix multiplication.
impl std::ops::Mul<Matrix44> for Matrix44 {
    type Output = Matrix44;

    #[inline]
    fn mul(self, rhs: Matrix44) -> Self::Output {
        ops::multiply(&self, &rhs)
    }
}

// In-place multiplication, the output aliases the left operand.
impl std::ops::MulAssign<Matrix44> for Matrix44 {
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix44) {
        ops::multiply_assign(self, &rhs);
    }
}

// Matrix-vector multiplication.
impl std::ops::Mul<[f32; 4]> for Matrix44 {
    type Output = [f32; 4];

    #[inline]
    fn mul(self, rhs: [f32; 4]) -> Self::Output {
        self.transform(rhs)
    }
}
