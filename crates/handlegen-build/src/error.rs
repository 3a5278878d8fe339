//! Error types for handlegen-build.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for handlegen-build operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading the generation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Configuration validation error.
    #[error("Config validation error: {0}")]
    Validation(String),
}
