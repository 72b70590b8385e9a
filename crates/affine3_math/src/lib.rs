//! 3D Transform Mathematics Library
//!
//! This crate provides the immutable linear-algebra kernel used by affine3.
//!
//! ## Core Types
//!
//! - [`Vector`] - 3D vector with x, y, z components
//! - [`Matrix`] - 4x4 homogeneous transform (row-major, column vectors)
//! - [`MatrixError`] - Failures raised by matrix inversion and division
//!
//! ## Conventions
//!
//! Transforms are applied by post-multiplying a column vector: `x' = M * x`.
//! When a matrix is built from basis vectors, its rows are those basis vectors.
//! Composing `A * B` applies `B` first, then `A`.

mod vector;
mod error;
pub mod matrix;
pub mod scalar;

pub use vector::{Vector, VectorOperand};
pub use matrix::{Matrix, MatrixOperand};
pub use error::MatrixError;
