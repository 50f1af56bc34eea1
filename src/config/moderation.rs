//! Auto-moderation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::decision::ModerationRules;

/// Progressive discipline and action parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Warnings held before a warn becomes a mute
    #[serde(default = "default_max_warnings")]
    pub max_warnings: u32,

    /// Mutes held before a mute becomes a kick
    #[serde(default = "default_max_mutes")]
    pub max_mutes: u32,

    /// Mute length in seconds
    #[serde(default = "default_mute_duration_secs")]
    pub mute_duration_secs: u64,
}

impl ModerationConfig {
    pub fn rules(&self) -> ModerationRules {
        ModerationRules {
            max_warnings: self.max_warnings,
            max_mutes: self.max_mutes,
        }
    }

    pub fn mute_duration(&self) -> Duration {
        Duration::from_secs(self.mute_duration_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_warnings == 0 {
            return Err(ValidationError::InvalidLimit("moderation.max_warnings"));
        }
        if self.max_mutes == 0 {
            return Err(ValidationError::InvalidLimit("moderation.max_mutes"));
        }
        if self.mute_duration_secs == 0 {
            return Err(ValidationError::InvalidLimit("moderation.mute_duration_secs"));
        }
        Ok(())
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            max_warnings: default_max_warnings(),
            max_mutes: default_max_mutes(),
            mute_duration_secs: default_mute_duration_secs(),
        }
    }
}

fn default_max_warnings() -> u32 {
    3
}

fn default_max_mutes() -> u32 {
    3
}

fn default_mute_duration_secs() -> u64 {
    600
}
