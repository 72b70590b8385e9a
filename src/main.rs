//! affine3 - transform pipeline runner
//!
//! Usage: `affine3 [PIPELINE.ron]`
//!
//! Without an argument the pipeline named in the configuration is used.

use std::process::ExitCode;

use affine3::config::{AppConfig, ConfigError};
use affine3::TransformPipeline;

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.pipeline.path.clone());

    let pipeline = TransformPipeline::load(&path)
        .map_err(|e| format!("Failed to load pipeline '{}': {}", path, e))?;
    log::info!("Loaded pipeline '{}' with {} steps and {} points",
        pipeline.name, pipeline.steps.len(), pipeline.points.len());

    let matrix = pipeline.compose()?;
    let output = &config.output;

    println!("{}", output.format_matrix(&matrix));
    println!("determinant: {}", matrix.determinant());
    if !matrix.is_invertible() {
        log::warn!("Composed transform is singular and cannot be inverted");
    }

    for point in pipeline.points.iter().copied().map(affine3::Vector::from) {
        println!("{} -> {}", output.format_vector(point), output.format_vector(matrix.transform(point)));
    }

    Ok(())
}

fn main() -> ExitCode {
    let loaded: Result<AppConfig, ConfigError> = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging; RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
