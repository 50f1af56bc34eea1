//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COMPANION_SAFETY` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a working
//! pattern-only configuration.
//!
//! # Example
//!
//! ```no_run
//! use companion_safety::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod behavior;
mod classifier;
mod error;
mod moderation;
mod telemetry;
mod timeouts;

pub use behavior::BehaviorConfig;
pub use classifier::ClassifierConfig;
pub use error::{ConfigError, ValidationError};
pub use moderation::ModerationConfig;
pub use telemetry::TelemetryConfig;
pub use timeouts::TimeoutConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Content classifier endpoint
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Behavior tracker window and spam limits
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Progressive discipline
    #[serde(default)]
    pub moderation: ModerationConfig,

    /// Collaborator call timeouts
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Log filter and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COMPANION_SAFETY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COMPANION_SAFETY__CLASSIFIER__ENDPOINT=...` -> `classifier.endpoint = ...`
    /// - `COMPANION_SAFETY__BEHAVIOR__TRACKED_USERS=5000` -> `behavior.tracked_users = 5000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPANION_SAFETY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.classifier.validate()?;
        self.behavior.validate()?;
        self.moderation.validate()?;
        self.timeouts.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "COMPANION_SAFETY__CLASSIFIER__ENDPOINT",
        "COMPANION_SAFETY__CLASSIFIER__API_KEY",
        "COMPANION_SAFETY__CLASSIFIER__TIMEOUT_MS",
        "COMPANION_SAFETY__BEHAVIOR__TRACKED_USERS",
        "COMPANION_SAFETY__MODERATION__MAX_WARNINGS",
        "COMPANION_SAFETY__TIMEOUTS__PERSISTENCE_MS",
        "COMPANION_SAFETY__TELEMETRY__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(!config.classifier.is_configured());
        assert_eq!(config.behavior.tracked_users, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COMPANION_SAFETY__CLASSIFIER__ENDPOINT", "https://classifier.example.com/v1");
        env::set_var("COMPANION_SAFETY__CLASSIFIER__API_KEY", "key-123");
        env::set_var("COMPANION_SAFETY__CLASSIFIER__TIMEOUT_MS", "1500");
        env::set_var("COMPANION_SAFETY__BEHAVIOR__TRACKED_USERS", "500");
        env::set_var("COMPANION_SAFETY__MODERATION__MAX_WARNINGS", "2");
        env::set_var("COMPANION_SAFETY__TIMEOUTS__PERSISTENCE_MS", "750");
        env::set_var("COMPANION_SAFETY__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.classifier.endpoint.as_deref(),
            Some("https://classifier.example.com/v1")
        );
        assert_eq!(config.classifier.timeout_ms, 1500);
        assert_eq!(config.behavior.tracked_users, 500);
        assert_eq!(config.moderation.max_warnings, 2);
        assert_eq!(config.timeouts.persistence_ms, 750);
        assert!(config.telemetry.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let config = AppConfig {
            classifier: ClassifierConfig {
                endpoint: Some("ftp://nope".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidClassifierEndpoint)
        );
    }
}
