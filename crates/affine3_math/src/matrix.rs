//! 4x4 homogeneous transform matrix
//!
//! The convention here is post-multiplication by a column vector: `x = A * b`.
//!
//! If you think of a matrix in terms of basis vectors, the rows of the 3x3
//! block are the basis vectors. Column 4 of rows 1-3 holds the translation and
//! every factory leaves row 4 as `(0, 0, 0, 1)` (projections excepted).
//!
//! When composing `A * B * C * D` the transforms are applied to a point in the
//! order D, C, B, A. Viewed as changes of coordinate system, the systems change
//! in the order A, B, C, D.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::scalar::EPSILON_SQUARED;
use crate::{MatrixError, Vector};

/// 4x4 matrix (row-major, entries named `m{row}{col}`)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

/// Right-hand side of [`Matrix::multiply`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatrixOperand {
    Matrix(Matrix),
    Scalar(f32),
}

impl From<Matrix> for MatrixOperand {
    fn from(m: Matrix) -> Self {
        MatrixOperand::Matrix(m)
    }
}

impl From<f32> for MatrixOperand {
    fn from(s: f32) -> Self {
        MatrixOperand::Scalar(s)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Matrix {
    /// All sixteen entries zero
    pub const ZERO: Self = Self::from_rows([
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ]);

    /// Identity matrix
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    // Construction

    /// Create a matrix from explicit rows
    pub const fn from_rows(r: [[f32; 4]; 4]) -> Self {
        Self {
            m11: r[0][0],
            m12: r[0][1],
            m13: r[0][2],
            m14: r[0][3],
            m21: r[1][0],
            m22: r[1][1],
            m23: r[1][2],
            m24: r[1][3],
            m31: r[2][0],
            m32: r[2][1],
            m33: r[2][2],
            m34: r[2][3],
            m41: r[3][0],
            m42: r[3][1],
            m43: r[3][2],
            m44: r[3][3],
        }
    }

    /// Load a matrix from sixteen values stored row by row, left to right
    #[inline]
    pub fn from_row_major(data: [f32; 16]) -> Self {
        bytemuck::cast(data)
    }

    /// Create a matrix whose 3x3 block rows are the given basis vectors
    ///
    /// ```text
    /// ax ay az 0
    /// bx by bz 0
    /// cx cy cz 0
    /// 0  0  0  1
    /// ```
    pub fn from_basis_vectors(a: Vector, b: Vector, c: Vector) -> Self {
        Self::from_rows([
            [a.x, a.y, a.z, 0.0],
            [b.x, b.y, b.z, 0.0],
            [c.x, c.y, c.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a matrix from explicit 3x3 block rows; row and column 4 are identity
    pub fn from_block3x3(r: [[f32; 3]; 3]) -> Self {
        Self::from_rows([
            [r[0][0], r[0][1], r[0][2], 0.0],
            [r[1][0], r[1][1], r[1][2], 0.0],
            [r[2][0], r[2][1], r[2][2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a matrix from a flat list of values, dispatching on its length
    ///
    /// Nine values fill the 3x3 block, sixteen values fill the whole matrix in
    /// row-major order. Any other length yields [`Matrix::ZERO`].
    pub fn from_values(values: &[f32]) -> Self {
        if let Ok(entries) = <[f32; 16]>::try_from(values) {
            return Self::from_row_major(entries);
        }
        if let Ok(v) = <[f32; 9]>::try_from(values) {
            return Self::from_block3x3([[v[0], v[1], v[2]], [v[3], v[4], v[5]], [v[6], v[7], v[8]]]);
        }
        Self::ZERO
    }

    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    // Factories

    /// Translation matrix
    ///
    /// ```text
    /// 1 0 0 x
    /// 0 1 0 y
    /// 0 0 1 z
    /// 0 0 0 1
    /// ```
    ///
    /// # Example
    /// ```
    /// use affine3_math::{Matrix, Vector};
    /// let m = Matrix::translate(1.0, 2.0, 3.0);
    /// assert_eq!(m.transform(Vector::ZERO), Vector::new(1.0, 2.0, 3.0));
    /// // Directions are not moved
    /// assert_eq!(m.transform3x3(Vector::X), Vector::X);
    /// ```
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation matrix from an offset vector
    #[inline]
    pub fn translate_vector(offset: Vector) -> Self {
        Self::translate(offset.x, offset.y, offset.z)
    }

    /// Uniform scale matrix
    pub fn scale(s: f32) -> Self {
        Self::diagonal(s, s, s)
    }

    /// Diagonal matrix with `1` in the homogeneous corner
    pub fn diagonal(a: f32, b: f32, c: f32) -> Self {
        Self::diagonal_with_w(a, b, c, 1.0)
    }

    /// Diagonal matrix with an explicit homogeneous entry (NaN becomes 1)
    pub fn diagonal_with_w(a: f32, b: f32, c: f32, d: f32) -> Self {
        let d = if d.is_nan() { 1.0 } else { d };
        Self::from_rows([
            [a, 0.0, 0.0, 0.0],
            [0.0, b, 0.0, 0.0],
            [0.0, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, d],
        ])
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis need not be normalized. An axis shorter than
    /// [`EPSILON`](crate::scalar::EPSILON) has no direction, so the identity
    /// is returned.
    ///
    /// # Example
    /// ```
    /// use affine3_math::{Matrix, Vector};
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// // Quarter turn about Z takes X to Y
    /// let m = Matrix::rotate(FRAC_PI_2, Vector::Z);
    /// let v = m.transform(Vector::X);
    /// assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
    ///
    /// assert_eq!(Matrix::rotate(FRAC_PI_2, Vector::ZERO), Matrix::IDENTITY);
    /// ```
    pub fn rotate(angle: f32, axis: Vector) -> Self {
        if axis.length_squared() < EPSILON_SQUARED {
            return Self::IDENTITY;
        }

        let n = axis.normalize();

        let cos = angle.cos();
        let sin = angle.sin();
        let one_minus_cos = 1.0 - cos;

        let x2 = n.x * n.x;
        let y2 = n.y * n.y;
        let z2 = n.z * n.z;
        let xym = n.x * n.y * one_minus_cos;
        let xzm = n.x * n.z * one_minus_cos;
        let yzm = n.y * n.z * one_minus_cos;
        let x_sin = n.x * sin;
        let y_sin = n.y * sin;
        let z_sin = n.z * sin;

        Self::from_rows([
            [x2 * one_minus_cos + cos, xym - z_sin, xzm + y_sin, 0.0],
            [xym + z_sin, y2 * one_minus_cos + cos, yzm - x_sin, 0.0],
            [xzm - y_sin, yzm + x_sin, z2 * one_minus_cos + cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Left-handed view matrix looking from `eye` towards `at`
    ///
    /// The axis rows are the raw cross products and are NOT normalized, so
    /// the block is only orthonormal when `at - eye` and `up` are unit length
    /// and perpendicular.
    ///
    /// # Example
    /// ```
    /// use affine3_math::{Matrix, Vector};
    ///
    /// let eye = Vector::new(0.0, 0.0, -5.0);
    /// let view = Matrix::look_at(eye, Vector::ZERO, Vector::Y);
    /// // The eye maps to the origin of view space
    /// assert_eq!(view.transform(eye), Vector::ZERO);
    /// // Forward is at - eye, unnormalized
    /// assert_eq!(view.row(2), [0.0, 0.0, 5.0, 25.0]);
    /// ```
    pub fn look_at(eye: Vector, at: Vector, up: Vector) -> Self {
        let z_axis = at - eye;
        let x_axis = up.cross(z_axis);
        let y_axis = z_axis.cross(x_axis);

        Self::from_rows([
            [x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(eye)],
            [y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(eye)],
            [z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Orthographic projection of the box `[l, r] x [b, t] x [n, f]`
    pub fn orthographic(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Self {
        let sx = 1.0 / (r - l);
        let sy = 1.0 / (t - b);
        let sz = 1.0 / (f - n);
        Self::from_rows([
            [2.0 * sx, 0.0, 0.0, -(r + l) * sx],
            [0.0, 2.0 * sy, 0.0, -(t + b) * sy],
            [0.0, 0.0, -2.0 * sz, -(n + f) * sz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Perspective projection from explicit frustum planes
    ///
    /// Note the plane order: left, right, top, bottom, near, far.
    pub fn perspective(l: f32, r: f32, t: f32, b: f32, n: f32, f: f32) -> Self {
        Self::from_rows([
            [2.0 * n / (r - l), 0.0, 0.0, 0.0],
            [0.0, 2.0 * n / (t - b), 0.0, 0.0],
            [0.0, 0.0, f / (f - n), n * f / (n - f)],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Perspective projection from a vertical field of view (radians) and aspect ratio
    pub fn perspective_fov(fov: f32, aspect: f32, n: f32, f: f32) -> Self {
        let t = (fov * 0.5).tan() * n;
        let b = -t;
        let l = aspect * b;
        let r = aspect * t;
        Self::perspective(l, r, t, b, n, f)
    }

    // Algebra

    /// Determinant of the 3x3 block (row and column 4 are ignored)
    pub fn determinant(&self) -> f32 {
        -self.m13 * self.m22 * self.m31
            + self.m12 * self.m23 * self.m31
            + self.m13 * self.m21 * self.m32
            - self.m11 * self.m23 * self.m32
            - self.m12 * self.m21 * self.m33
            + self.m11 * self.m22 * self.m33
    }

    /// True if the 3x3 determinant is nonzero (no tolerance)
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Inverse of an affine transform
    ///
    /// The 3x3 block is inverted through its adjugate and the translation
    /// becomes `-(inverse block * translation)`. Row 4 is copied unchanged,
    /// so the result is only a true inverse when row 4 is `(0, 0, 0, 1)`.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(MatrixError::Singular { determinant });
        }

        let k = 1.0 / determinant;

        let m11 = (self.m22 * self.m33 - self.m32 * self.m23) * k;
        let m12 = (self.m32 * self.m13 - self.m12 * self.m33) * k;
        let m13 = (self.m12 * self.m23 - self.m22 * self.m13) * k;
        let m21 = (self.m23 * self.m31 - self.m33 * self.m21) * k;
        let m22 = (self.m33 * self.m11 - self.m13 * self.m31) * k;
        let m23 = (self.m13 * self.m21 - self.m23 * self.m11) * k;
        let m31 = (self.m21 * self.m32 - self.m31 * self.m22) * k;
        let m32 = (self.m31 * self.m12 - self.m11 * self.m32) * k;
        let m33 = (self.m11 * self.m22 - self.m21 * self.m12) * k;

        let m14 = -(m11 * self.m14 + m12 * self.m24 + m13 * self.m34);
        let m24 = -(m21 * self.m14 + m22 * self.m24 + m23 * self.m34);
        let m34 = -(m31 * self.m14 + m32 * self.m24 + m33 * self.m34);

        Ok(Self::from_rows([
            [m11, m12, m13, m14],
            [m21, m22, m23, m24],
            [m31, m32, m33, m34],
            [self.m41, self.m42, self.m43, self.m44],
        ]))
    }

    /// Transform a point: apply the 3x3 block, then add the translation
    pub fn transform(&self, v: Vector) -> Vector {
        Vector::new(
            v.x * self.m11 + v.y * self.m12 + v.z * self.m13 + self.m14,
            v.x * self.m21 + v.y * self.m22 + v.z * self.m23 + self.m24,
            v.x * self.m31 + v.y * self.m32 + v.z * self.m33 + self.m34,
        )
    }

    /// Transform a direction using only the 3x3 block
    pub fn transform3x3(&self, v: Vector) -> Vector {
        Vector::new(
            v.x * self.m11 + v.y * self.m12 + v.z * self.m13,
            v.x * self.m21 + v.y * self.m22 + v.z * self.m23,
            v.x * self.m31 + v.y * self.m32 + v.z * self.m33,
        )
    }

    #[inline]
    pub fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    pub fn subtract(self, other: Self) -> Self {
        self - other
    }

    /// Multiply by a matrix (matrix product) or a scalar (entry-wise scaling)
    ///
    /// `a.multiply(b)` applies `b` first, then `a`.
    #[inline]
    pub fn multiply(self, rhs: impl Into<MatrixOperand>) -> Self {
        match rhs.into() {
            MatrixOperand::Matrix(m) => self * m,
            MatrixOperand::Scalar(s) => self * s,
        }
    }

    /// Divide every entry by `s`
    pub fn divide(self, s: f32) -> Result<Self, MatrixError> {
        if s == 0.0 {
            return Err(MatrixError::DivideByZero);
        }
        Ok(self * (1.0 / s))
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let r = self.to_rows();
        Self::from_rows([
            [r[0][0], r[1][0], r[2][0], r[3][0]],
            [r[0][1], r[1][1], r[2][1], r[3][1]],
            [r[0][2], r[1][2], r[2][2], r[3][2]],
            [r[0][3], r[1][3], r[2][3], r[3][3]],
        ])
    }

    // Access

    /// Entries in row-major order (suitable for uploading to a graphics API)
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        bytemuck::cast(*self)
    }

    /// Row `i` (zero-based)
    ///
    /// # Panics
    /// Panics if `i > 3`.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; 4] {
        self.to_rows()[i]
    }

    /// Render on a single line as `Matrix(m11, m12, ..., m44)`
    pub fn single_line(&self) -> String {
        format!("{:#}", self)
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        let a: [f32; 16] = bytemuck::cast(self);
        Self::from_row_major(a.map(f))
    }

    fn zip_with(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let a: [f32; 16] = bytemuck::cast(self);
        let b: [f32; 16] = bytemuck::cast(other);
        Self::from_row_major(std::array::from_fn(|i| f(a[i], b[i])))
    }
}

/// Zero-based `(row, column)` access
impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 4 && col < 4, "matrix index ({}, {}) out of range", row, col);
        &self.as_array()[row * 4 + col]
    }
}

impl fmt::Display for Matrix {
    /// Multi-line by default; `{:#}` renders on a single line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.as_array();
        if f.alternate() {
            write!(f, "Matrix(")?;
            for (i, v) in e.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, ")")
        } else {
            for (i, row) in e.chunks_exact(4).enumerate() {
                if i == 0 {
                    write!(f, "Matrix: ")?;
                } else {
                    write!(f, "\n        ")?;
                }
                write!(f, "{}, {}, {}, {}", row[0], row[1], row[2], row[3])?;
            }
            Ok(())
        }
    }
}

// Operator overloads

impl std::ops::Add for Matrix {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl std::ops::Sub for Matrix {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl std::ops::Neg for Matrix {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl std::ops::Mul<f32> for Matrix {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        self.map(|a| a * scalar)
    }
}

/// Matrix product: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Matrix {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, other: Self) -> Self {
        let a = self.to_rows();
        let b = other.to_rows();
        let mut result = [[0.0f32; 4]; 4];

        for i in 0..4 {
            for j in 0..4 {
                result[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j];
            }
        }

        Self::from_rows(result)
    }
}

/// `m * v` is [`Matrix::transform`]
impl std::ops::Mul<Vector> for Matrix {
    type Output = Vector;
    #[inline]
    fn mul(self, v: Vector) -> Vector {
        self.transform(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vector, b: Vector) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Matrix, b: Matrix) -> bool {
        a.as_array().iter().zip(b.as_array()).all(|(x, y)| approx_eq(*x, *y))
    }

    fn sample() -> Matrix {
        Matrix::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn test_constants() {
        assert!(Matrix::ZERO.as_array().iter().all(|&v| v == 0.0));
        assert_eq!(Matrix::IDENTITY.row(0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(Matrix::IDENTITY.row(3), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Matrix::default(), Matrix::zero());
        assert_eq!(Matrix::identity(), Matrix::IDENTITY);
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let m = sample();
        assert_eq!(m.m12, 2.0);
        assert_eq!(m.m21, 5.0);
        assert_eq!(m.m44, 16.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(3, 2)], 15.0);
        assert_eq!(m.as_array()[4], 5.0);
    }

    #[test]
    fn test_from_row_major() {
        let data: [f32; 16] = std::array::from_fn(|i| i as f32 + 1.0);
        assert_eq!(Matrix::from_row_major(data), sample());
        assert_eq!(Matrix::from_values(&data), sample());
    }

    #[test]
    fn test_from_basis_vectors() {
        let m = Matrix::from_basis_vectors(
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(4.0, 5.0, 6.0),
            Vector::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.row(0), [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(m.row(1), [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(m.row(2), [7.0, 8.0, 9.0, 0.0]);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_values_block() {
        let m = Matrix::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m, Matrix::from_block3x3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]));
        assert_eq!(m.row(1), [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(m.m44, 1.0);
    }

    #[test]
    fn test_from_values_unrecognised_shape_is_zero() {
        assert_eq!(Matrix::from_values(&[]), Matrix::ZERO);
        assert_eq!(Matrix::from_values(&[1.0; 5]), Matrix::ZERO);
        assert_eq!(Matrix::from_values(&[1.0; 15]), Matrix::ZERO);
        // The fallback is not the identity
        assert_eq!(Matrix::from_values(&[1.0; 5]).m11, 0.0);
    }

    #[test]
    fn test_translate() {
        let m = Matrix::translate(1.0, 2.0, 3.0);
        assert_eq!(m.transform(Vector::ZERO), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(m, Matrix::translate_vector(Vector::new(1.0, 2.0, 3.0)));
        // Directions ignore translation
        assert_eq!(m.transform3x3(Vector::X), Vector::X);
    }

    #[test]
    fn test_scale_and_diagonal() {
        let s = Matrix::scale(2.0);
        assert_eq!(s, Matrix::diagonal(2.0, 2.0, 2.0));
        assert_eq!(s.m44, 1.0);
        assert_eq!(s.transform(Vector::new(1.0, 2.0, 3.0)), Vector::new(2.0, 4.0, 6.0));

        let d = Matrix::diagonal_with_w(1.0, 2.0, 3.0, 4.0);
        assert_eq!(d.m44, 4.0);
        assert_eq!(Matrix::diagonal_with_w(1.0, 2.0, 3.0, f32::NAN).m44, 1.0);
    }

    #[test]
    fn test_rotate_degenerate_axis() {
        assert_eq!(Matrix::rotate(1.234, Vector::ZERO), Matrix::IDENTITY);
        assert_eq!(Matrix::rotate(PI, Vector::new(1e-6, 0.0, 0.0)), Matrix::IDENTITY);
    }

    #[test]
    fn test_rotate_about_z() {
        let m = Matrix::rotate(FRAC_PI_2, Vector::Z);
        // X should go to Y, Y to -X
        assert!(vec_approx_eq(m.transform(Vector::X), Vector::Y), "got {}", m.transform(Vector::X));
        assert!(vec_approx_eq(m.transform(Vector::Y), -Vector::X));
        assert!(vec_approx_eq(m.transform(Vector::Z), Vector::Z));

        let half_turn = Matrix::rotate(PI, Vector::Z);
        assert!(vec_approx_eq(half_turn.transform(Vector::X), Vector::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotate_normalizes_axis() {
        let a = Matrix::rotate(0.7, Vector::new(0.0, 5.0, 0.0));
        let b = Matrix::rotate(0.7, Vector::Y);
        assert!(mat_approx_eq(a, b));
    }

    #[test]
    fn test_rotate_is_orthonormal() {
        let m = Matrix::rotate(0.9, Vector::new(1.0, -2.0, 0.5));
        assert!(approx_eq(m.determinant(), 1.0));
        assert!(mat_approx_eq(m * m.transpose(), Matrix::IDENTITY));
    }

    #[test]
    fn test_look_at_unit_axes() {
        let eye = Vector::new(0.0, 0.0, -5.0);
        let m = Matrix::look_at(eye, Vector::ZERO, Vector::Y);
        // forward is +Z with length 5, so the rows carry that length
        assert_eq!(m.row(2), [0.0, 0.0, 5.0, 25.0]);
        assert_eq!(m.transform(eye), Vector::ZERO);
    }

    #[test]
    fn test_look_at_rows_are_not_normalized() {
        let m = Matrix::look_at(Vector::ZERO, Vector::new(0.0, 0.0, 2.0), Vector::new(0.0, 3.0, 0.0));
        // x = up x forward = (6, 0, 0), y = forward x x = (0, 12, 0)
        assert_eq!(m.row(0), [6.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.row(1), [0.0, 12.0, 0.0, 0.0]);
        assert_eq!(m.row(2), [0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_orthographic() {
        let m = Matrix::orthographic(-2.0, 2.0, -1.0, 1.0, 1.0, 11.0);
        assert!(vec_approx_eq(m.transform(Vector::new(2.0, 1.0, 0.0)), Vector::new(1.0, 1.0, -1.2)));
        assert!(vec_approx_eq(m.transform(Vector::new(-2.0, -1.0, 0.0)), Vector::new(-1.0, -1.0, -1.2)));
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_perspective() {
        let m = Matrix::perspective(-1.0, 1.0, 1.0, -1.0, 1.0, 10.0);
        assert_eq!(m.m11, 1.0);
        assert_eq!(m.m22, 1.0);
        assert!(approx_eq(m.m33, 10.0 / 9.0));
        assert!(approx_eq(m.m34, -10.0 / 9.0));
        assert_eq!(m.row(3), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_perspective_fov_delegates() {
        let m = Matrix::perspective_fov(FRAC_PI_2, 2.0, 1.0, 10.0);
        // tan(45deg) * near = 1, so t = 1, b = -1, l = -2, r = 2
        let expected = Matrix::perspective(-2.0, 2.0, 1.0, -1.0, 1.0, 10.0);
        assert!(mat_approx_eq(m, expected));
        assert!(approx_eq(m.m11, 0.5));
        assert!(approx_eq(m.m22, 1.0));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(Matrix::IDENTITY.determinant(), 1.0);
        assert_eq!(Matrix::diagonal(2.0, 3.0, 4.0).determinant(), 24.0);
        // The translation column does not matter
        assert_eq!(Matrix::translate(5.0, 6.0, 7.0).determinant(), 1.0);
        // Rows of sample() are linearly dependent
        assert_eq!(sample().determinant(), 0.0);
        assert!(!sample().is_invertible());
    }

    #[test]
    fn test_inverse_singular() {
        match Matrix::scale(0.0).inverse() {
            Err(MatrixError::Singular { determinant }) => assert_eq!(determinant, 0.0),
            other => panic!("Expected singular error, got {:?}", other),
        }
    }

    #[test]
    fn test_inverse_affine() {
        let m = Matrix::translate(1.0, -2.0, 3.0)
            * Matrix::rotate(0.6, Vector::new(1.0, 1.0, 0.0))
            * Matrix::diagonal(2.0, 0.5, 4.0);
        assert!(m.is_invertible());
        let inv = m.inverse().unwrap();
        assert!(mat_approx_eq(m * inv, Matrix::IDENTITY));
        assert!(mat_approx_eq(inv * m, Matrix::IDENTITY));

        let p = Vector::new(0.3, 7.0, -1.0);
        assert!(vec_approx_eq(inv.transform(m.transform(p)), p));
    }

    #[test]
    fn test_inverse_copies_row_four() {
        let mut m = Matrix::scale(2.0);
        m.m41 = 9.0;
        let inv = m.inverse().unwrap();
        assert_eq!(inv.row(3), [9.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_mul_identity() {
        let m = sample();
        assert_eq!(Matrix::IDENTITY * m, m);
        assert_eq!(m * Matrix::IDENTITY, m);
        assert_eq!(m.multiply(Matrix::IDENTITY), m);
    }

    #[test]
    fn test_mul_order() {
        // Scale first, then translate
        let m = Matrix::translate(1.0, 0.0, 0.0).multiply(Matrix::scale(2.0));
        assert_eq!(m.transform(Vector::X), Vector::new(3.0, 0.0, 0.0));
        // Translate first, then scale
        let m = Matrix::scale(2.0) * Matrix::translate(1.0, 0.0, 0.0);
        assert_eq!(m * Vector::X, Vector::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_mul_composition() {
        let r45 = Matrix::rotate(PI / 4.0, Vector::Z);
        let r90 = Matrix::rotate(FRAC_PI_2, Vector::Z);
        assert!(mat_approx_eq(r45 * r45, r90));
    }

    #[test]
    fn test_mul_scalar() {
        let m = sample().multiply(2.0f32);
        assert_eq!(m.m11, 2.0);
        assert_eq!(m.m44, 32.0);
        assert_eq!(sample() * 2.0, m);
    }

    #[test]
    fn test_add_sub_neg() {
        let m = sample();
        assert_eq!(m.add(m), m * 2.0);
        assert_eq!(m.subtract(m), Matrix::ZERO);
        assert_eq!(m + -m, Matrix::ZERO);
    }

    #[test]
    fn test_divide() {
        let m = Matrix::scale(4.0).divide(2.0).unwrap();
        assert_eq!(m.m11, 2.0);
        assert_eq!(m.m44, 0.5);
        assert_eq!(sample().divide(0.0), Err(MatrixError::DivideByZero));
    }

    #[test]
    fn test_transpose() {
        let t = sample().transpose();
        assert_eq!(t.row(0), [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn test_equality_is_exact() {
        let mut m = Matrix::IDENTITY;
        assert_eq!(m, Matrix::IDENTITY);
        m.m23 = 1e-7;
        assert_ne!(m, Matrix::IDENTITY);
    }

    #[test]
    fn test_display_multi_line() {
        let s = Matrix::translate(1.0, 2.0, 3.0).to_string();
        assert_eq!(
            s,
            "Matrix: 1, 0, 0, 1\n        0, 1, 0, 2\n        0, 0, 1, 3\n        0, 0, 0, 1"
        );
    }

    #[test]
    fn test_display_single_line() {
        let s = Matrix::IDENTITY.single_line();
        assert_eq!(s, "Matrix(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)");
        assert_eq!(format!("{:#}", Matrix::IDENTITY), s);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range() {
        let _ = Matrix::IDENTITY[(4, 0)];
    }
}
