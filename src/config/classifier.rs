//! Content classifier configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::classifier::HttpClassifierConfig;

/// Classifier endpoint configuration
///
/// With no endpoint the pipeline runs on pattern matching alone.
#[derive(Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Classification endpoint URL
    pub endpoint: Option<String>,

    /// Bearer token for the endpoint
    pub api_key: Option<String>,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// HTTP adapter configuration, if an endpoint is set.
    pub fn http_config(&self) -> Option<HttpClassifierConfig> {
        let endpoint = self.endpoint.as_ref().filter(|e| !e.is_empty())?;
        let mut config = HttpClassifierConfig::new(endpoint.clone()).with_timeout(self.timeout());
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            config = config.with_api_key(key.clone());
        }
        Some(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidClassifierEndpoint);
            }
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout("classifier.timeout_ms"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}
