//! affine3 - transform pipeline runner
//!
//! Loads a pipeline of 3D transforms, composes it into a single 4x4 matrix
//! with [`affine3_math`], and applies it to a set of points.

pub mod config;
pub mod pipeline;

pub use pipeline::{TransformPipeline, TransformStep, PipelineError};

// Re-export the kernel types for convenience
pub use affine3_math::{Matrix, MatrixError, Vector};
