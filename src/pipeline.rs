//! Serializable transform pipelines
//!
//! A pipeline is an ordered list of [`TransformStep`]s plus the points to push
//! through them. Steps are stored as construction parameters so pipelines can
//! be written by hand in RON files:
//!
//! ```ron
//! (
//!     name: "spin and lift",
//!     steps: [
//!         (type: "Rotate", degrees: 90.0, axis: (0.0, 0.0, 1.0)),
//!         (type: "Translate", offset: (0.0, 2.0, 0.0)),
//!     ],
//!     points: [(1.0, 0.0, 0.0)],
//! )
//! ```
//!
//! The first step is applied to a point first.

use std::fs;
use std::io;
use std::path::Path;

use affine3_math::{scalar, Matrix, MatrixError, Vector};
use serde::{Serialize, Deserialize};

fn default_w() -> f32 {
    1.0
}

/// A single transform in a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformStep {
    /// Move by an offset
    Translate {
        offset: [f32; 3],
    },
    /// Uniform scale
    Scale {
        factor: f32,
    },
    /// Per-axis scale, with an optional homogeneous entry (defaults to 1)
    Diagonal {
        x: f32,
        y: f32,
        z: f32,
        #[serde(default = "default_w")]
        w: f32,
    },
    /// Rotation about an axis; angle in degrees
    Rotate {
        degrees: f32,
        axis: [f32; 3],
    },
    /// Left-handed view transform
    LookAt {
        eye: [f32; 3],
        at: [f32; 3],
        up: [f32; 3],
    },
    /// Orthographic projection
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Perspective projection from frustum planes
    Perspective {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
    /// Perspective projection from a vertical field of view in degrees
    PerspectiveFov {
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// An explicit matrix, given row by row
    Matrix {
        rows: [[f32; 4]; 4],
    },
    /// Replace everything accumulated so far with its inverse
    Invert,
}

impl TransformStep {
    /// Apply this step after `current`
    ///
    /// Returns `step * current`, or the inverse of `current` for
    /// [`TransformStep::Invert`].
    pub fn apply(&self, current: Matrix) -> Result<Matrix, MatrixError> {
        let step = match self {
            TransformStep::Translate { offset } => Matrix::translate_vector((*offset).into()),
            TransformStep::Scale { factor } => Matrix::scale(*factor),
            TransformStep::Diagonal { x, y, z, w } => Matrix::diagonal_with_w(*x, *y, *z, *w),
            TransformStep::Rotate { degrees, axis } => {
                Matrix::rotate(scalar::to_radians(*degrees), (*axis).into())
            }
            TransformStep::LookAt { eye, at, up } => {
                Matrix::look_at((*eye).into(), (*at).into(), (*up).into())
            }
            TransformStep::Orthographic { left, right, bottom, top, near, far } => {
                Matrix::orthographic(*left, *right, *bottom, *top, *near, *far)
            }
            TransformStep::Perspective { left, right, top, bottom, near, far } => {
                Matrix::perspective(*left, *right, *top, *bottom, *near, *far)
            }
            TransformStep::PerspectiveFov { fov_degrees, aspect, near, far } => {
                Matrix::perspective_fov(scalar::to_radians(*fov_degrees), *aspect, *near, *far)
            }
            TransformStep::Matrix { rows } => Matrix::from_rows(*rows),
            TransformStep::Invert => return current.inverse(),
        };
        Ok(step * current)
    }

    /// True for a rotation whose axis is too short to have a direction
    pub fn is_degenerate(&self) -> bool {
        match self {
            TransformStep::Rotate { axis, .. } => {
                Vector::from(*axis).length_squared() < scalar::EPSILON_SQUARED
            }
            _ => false,
        }
    }

    /// Create a translation step
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        TransformStep::Translate { offset: [x, y, z] }
    }

    /// Create a rotation step (degrees)
    pub fn rotate(degrees: f32, axis: [f32; 3]) -> Self {
        TransformStep::Rotate { degrees, axis }
    }

    /// Create a uniform scale step
    pub fn scale(factor: f32) -> Self {
        TransformStep::Scale { factor }
    }
}

/// An ordered list of transforms and the points to run through them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPipeline {
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Steps, first applied first
    #[serde(default)]
    pub steps: Vec<TransformStep>,
    /// Points to transform
    #[serde(default)]
    pub points: Vec<[f32; 3]>,
}

impl TransformPipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Load a pipeline from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let pipeline = ron::from_str(&contents)?;
        Ok(pipeline)
    }

    /// Save a pipeline to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(false)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a step to the end of the pipeline
    pub fn with_step(mut self, step: TransformStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a point to transform
    pub fn with_point(mut self, point: [f32; 3]) -> Self {
        self.points.push(point);
        self
    }

    /// Fold all steps into a single matrix
    ///
    /// An empty pipeline composes to the identity.
    pub fn compose(&self) -> Result<Matrix, PipelineError> {
        let mut matrix = Matrix::IDENTITY;
        for (index, step) in self.steps.iter().enumerate() {
            if step.is_degenerate() {
                log::warn!("Step {} ({:?}) has a degenerate axis and is the identity", index, step);
            }
            matrix = step
                .apply(matrix)
                .map_err(|source| PipelineError::Matrix { step: index, source })?;
            log::debug!("After step {}:\n{}", index, matrix);
        }
        Ok(matrix)
    }

    /// Compose the pipeline and transform every point
    pub fn apply(&self) -> Result<Vec<(Vector, Vector)>, PipelineError> {
        let matrix = self.compose()?;
        Ok(self
            .points
            .iter()
            .map(|&p| {
                let p = Vector::from(p);
                (p, matrix.transform(p))
            })
            .collect())
    }
}

/// Error loading, saving, or composing a pipeline
#[derive(Debug)]
pub enum PipelineError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// A step could not be applied
    Matrix {
        /// Index of the failing step
        step: usize,
        source: MatrixError,
    },
}

impl From<io::Error> for PipelineError {
    fn from(e: io::Error) -> Self {
        PipelineError::Io(e)
    }
}

impl From<ron::error::SpannedError> for PipelineError {
    fn from(e: ron::error::SpannedError) -> Self {
        PipelineError::Parse(e)
    }
}

impl From<ron::Error> for PipelineError {
    fn from(e: ron::Error) -> Self {
        PipelineError::Serialize(e)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "IO error: {}", e),
            PipelineError::Parse(e) => write!(f, "Parse error: {}", e),
            PipelineError::Serialize(e) => write!(f, "Serialization error: {}", e),
            PipelineError::Matrix { step, source } => write!(f, "Step {} failed: {}", step, source),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io(e) => Some(e),
            PipelineError::Parse(e) => Some(e),
            PipelineError::Serialize(e) => Some(e),
            PipelineError::Matrix { source, .. } => Some(source),
        }
    }
}
