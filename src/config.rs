//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`AF3_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use affine3_math::{scalar, Matrix, Vector};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`AF3_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // AF3_OUTPUT__SINGLE_LINE=true -> output.single_line = true
        figment = figment.merge(Env::prefixed("AF3_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the RON pipeline file to run
    pub path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            path: "pipelines/default.ron".to_string(),
        }
    }
}

/// Output formatting configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print matrices on a single line
    #[serde(default)]
    pub single_line: bool,
    /// Round printed values to this many decimal places
    #[serde(default)]
    pub precision: Option<i32>,
}

impl OutputConfig {
    fn round(&self, v: f32) -> f32 {
        match self.precision {
            Some(places) => scalar::round(v, places),
            None => v,
        }
    }

    /// Format a matrix with the configured layout and rounding
    pub fn format_matrix(&self, m: &Matrix) -> String {
        let rounded = Matrix::from_row_major(m.as_array().map(|v| self.round(v)));
        if self.single_line {
            rounded.single_line()
        } else {
            rounded.to_string()
        }
    }

    /// Format a vector with the configured rounding
    pub fn format_vector(&self, v: Vector) -> String {
        Vector::new(self.round(v.x), self.round(v.y), self.round(v.z)).to_string()
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
