//! Collaborator call timeouts

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bounds on every suspension point, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_policy_read_ms")]
    pub policy_read_ms: u64,

    #[serde(default = "default_persistence_ms")]
    pub persistence_ms: u64,

    /// Alerts, support messages and platform actions
    #[serde(default = "default_downstream_ms")]
    pub downstream_ms: u64,
}

impl TimeoutConfig {
    pub fn policy_read(&self) -> Duration {
        Duration::from_millis(self.policy_read_ms)
    }

    pub fn persistence(&self) -> Duration {
        Duration::from_millis(self.persistence_ms)
    }

    pub fn downstream(&self) -> Duration {
        Duration::from_millis(self.downstream_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.policy_read_ms == 0 {
            return Err(ValidationError::InvalidTimeout("timeouts.policy_read_ms"));
        }
        if self.persistence_ms == 0 {
            return Err(ValidationError::InvalidTimeout("timeouts.persistence_ms"));
        }
        if self.downstream_ms == 0 {
            return Err(ValidationError::InvalidTimeout("timeouts.downstream_ms"));
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            policy_read_ms: default_policy_read_ms(),
            persistence_ms: default_persistence_ms(),
            downstream_ms: default_downstream_ms(),
        }
    }
}

fn default_policy_read_ms() -> u64 {
    2000
}

fn default_persistence_ms() -> u64 {
    5000
}

fn default_downstream_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults() {
        let config = TimeoutConfig::default();
        assert_eq!(config.policy_read(), Duration::from_secs(2));
        assert_eq!(config.persistence(), Duration::from_secs(5));
        assert_eq!(config.downstream(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero() {
        let config = TimeoutConfig {
            persistence_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("timeouts.persistence_ms"))
        );
    }
}
