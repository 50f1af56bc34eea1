//! Behavior tracking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::behavior::BehaviorLimits;

/// Sliding-window and spam limits for the behavior tracker
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_min_messages")]
    pub min_messages: usize,

    #[serde(default = "default_min_span_secs")]
    pub min_span_secs: i64,

    #[serde(default = "default_max_messages_per_minute")]
    pub max_messages_per_minute: f64,

    #[serde(default = "default_min_repetition_ratio")]
    pub min_repetition_ratio: f64,

    /// Users held in memory before the least recently seen is evicted
    #[serde(default = "default_tracked_users")]
    pub tracked_users: usize,
}

impl BehaviorConfig {
    pub fn limits(&self) -> BehaviorLimits {
        BehaviorLimits {
            window_secs: self.window_secs,
            max_entries: self.max_entries,
            min_messages: self.min_messages,
            min_span_secs: self.min_span_secs,
            max_messages_per_minute: self.max_messages_per_minute,
            min_repetition_ratio: self.min_repetition_ratio,
            tracked_users: self.tracked_users,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_secs <= 0 {
            return Err(ValidationError::InvalidLimit("behavior.window_secs"));
        }
        if self.max_entries == 0 {
            return Err(ValidationError::InvalidLimit("behavior.max_entries"));
        }
        if self.min_messages == 0 || self.min_messages > self.max_entries {
            return Err(ValidationError::InvalidLimit("behavior.min_messages"));
        }
        if self.min_span_secs <= 0 {
            return Err(ValidationError::InvalidLimit("behavior.min_span_secs"));
        }
        if self.max_messages_per_minute <= 0.0 {
            return Err(ValidationError::InvalidLimit("behavior.max_messages_per_minute"));
        }
        if !(0.0..=1.0).contains(&self.min_repetition_ratio) {
            return Err(ValidationError::InvalidRepetitionRatio);
        }
        if self.tracked_users == 0 {
            return Err(ValidationError::InvalidLimit("behavior.tracked_users"));
        }
        Ok(())
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_entries: default_max_entries(),
            min_messages: default_min_messages(),
            min_span_secs: default_min_span_secs(),
            max_messages_per_minute: default_max_messages_per_minute(),
            min_repetition_ratio: default_min_repetition_ratio(),
            tracked_users: default_tracked_users(),
        }
    }
}

fn default_window_secs() -> i64 {
    3600
}

fn default_max_entries() -> usize {
    10
}

fn default_min_messages() -> usize {
    5
}

fn default_min_span_secs() -> i64 {
    30
}

fn default_max_messages_per_minute() -> f64 {
    15.0
}

fn default_min_repetition_ratio() -> f64 {
    0.3
}

fn default_tracked_users() -> usize {
    10_000
}
