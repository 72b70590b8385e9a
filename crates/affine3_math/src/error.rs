//! Matrix error types
//!
//! Only genuine failures are errors. Degenerate inputs that have a defined
//! fallback (unrecognised construction shape, zero rotation axis, zero-length
//! normalization) succeed with the fallback value instead.

use std::fmt;

/// Error type for matrix operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixError {
    /// The 3x3 linear block has a zero determinant, so there is no inverse
    Singular {
        /// The determinant that was computed
        determinant: f32,
    },
    /// Division of a matrix by zero
    DivideByZero,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Singular { determinant } => write!(
                f,
                "Cannot calculate the inverse of a singular matrix (determinant is {})",
                determinant
            ),
            MatrixError::DivideByZero => write!(f, "Cannot divide a matrix by 0"),
        }
    }
}

impl std::error::Error for MatrixError {}
