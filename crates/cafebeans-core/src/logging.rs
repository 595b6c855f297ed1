//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::logging::LoggingConfig;
use crate::error::AppError;

/// Install the global tracing subscriber from logging configuration.
///
/// The `RUST_LOG` environment variable overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let result = if config.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| AppError::configuration(format!("Failed to init tracing: {e}")))
}
