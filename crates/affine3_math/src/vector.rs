//! 3D Vector type
//!
//! Vectors are immutable values: every operation returns a new `Vector`.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// 3D Vector with x, y, z components
///
/// Deserialization goes through [`Vector::new`], so NaN components are
/// stored as `0.0` however the value is built.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "VectorFields")]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Serialized shape of [`Vector`]
#[derive(Deserialize)]
#[serde(rename = "Vector")]
struct VectorFields {
    x: f32,
    y: f32,
    z: f32,
}

impl From<VectorFields> for Vector {
    fn from(v: VectorFields) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Right-hand side of [`Vector::multiply`]
///
/// A vector operand selects the cross product, a scalar operand selects scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VectorOperand {
    Vector(Vector),
    Scalar(f32),
}

impl From<Vector> for VectorOperand {
    fn from(v: Vector) -> Self {
        VectorOperand::Vector(v)
    }
}

impl From<f32> for VectorOperand {
    fn from(s: f32) -> Self {
        VectorOperand::Scalar(s)
    }
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vector
    ///
    /// NaN components are replaced with `0.0`.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: if x.is_nan() { 0.0 } else { x },
            y: if y.is_nan() { 0.0 } else { y },
            z: if z.is_nan() { 0.0 } else { z },
        }
    }

    /// The zero (null) vector
    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Component-wise negation
    #[inline]
    pub fn negate(self) -> Self {
        -self
    }

    #[inline]
    pub fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    pub fn subtract(self, other: Self) -> Self {
        self - other
    }

    /// Multiply by a vector (cross product) or by a scalar (scaling)
    ///
    /// Vector times vector is the cross product, not the component-wise
    /// product. Use [`Vector::cross`] or [`Vector::scale`] when the intent
    /// should be explicit.
    #[inline]
    pub fn multiply(self, rhs: impl Into<VectorOperand>) -> Self {
        match rhs.into() {
            VectorOperand::Vector(v) => self.cross(v),
            VectorOperand::Scalar(s) => self.scale(s),
        }
    }

    /// Scale each component by `s`
    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Divide by a scalar
    ///
    /// No zero check: dividing by zero yields infinite or NaN components
    /// (NaN is then coerced to zero by [`Vector::new`]).
    #[inline]
    pub fn divide(self, scalar: f32) -> Self {
        self.scale(1.0 / scalar)
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-hand rule)
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    ///
    /// A zero-length vector is returned unchanged.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.divide(len)
        } else {
            self
        }
    }

    /// Alias for [`Vector::normalize`]
    #[inline]
    pub fn unit(self) -> Self {
        self.normalize()
    }

    /// True if the length is exactly 1.0 (no tolerance)
    #[inline]
    pub fn is_normalized(self) -> bool {
        self.length() == 1.0
    }

    /// Components as an array
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vector> for [f32; 3] {
    fn from(v: Vector) -> Self {
        v.to_array()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {}, {})", self.x, self.y, self.z)
    }
}

// Operator overloads

impl std::ops::Add for Vector {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vector {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f32> for Vector {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

/// `a * b` is the cross product
impl std::ops::Mul<Vector> for Vector {
    type Output = Self;
    #[inline]
    fn mul(self, other: Vector) -> Self {
        self.cross(other)
    }
}

impl std::ops::Div<f32> for Vector {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        self.divide(scalar)
    }
}

impl std::ops::Neg for Vector {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
