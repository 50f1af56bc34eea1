//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid classifier endpoint URL")]
    InvalidClassifierEndpoint,

    #[error("Invalid limit: {0}")]
    InvalidLimit(&'static str),

    #[error("Spam ratio must be between 0 and 1")]
    InvalidRepetitionRatio,

    #[error("Invalid log filter directive")]
    InvalidLogFilter,
}
