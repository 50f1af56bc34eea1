//! Safety settings read from the settings store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Per-user safety preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSafetySettings {
    pub opt_out_crisis: bool,
    pub opt_out_ai: bool,
    pub opt_out_support_dms: bool,
    pub privacy_mode: bool,
}

/// How eagerly crisis detection consults the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Medium => "medium",
            Sensitivity::High => "high",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Auto-moderation strictness, 1 (lenient) to 5 (strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AutoModLevel(u8);

impl AutoModLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a level, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "auto_mod_level",
                i32::from(Self::MIN),
                i32::from(Self::MAX),
                i32::from(value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for AutoModLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for AutoModLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<AutoModLevel> for u8 {
    fn from(level: AutoModLevel) -> Self {
        level.0
    }
}

impl fmt::Display for AutoModLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-guild safety configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSafetySettings {
    pub crisis_alerts_enabled: bool,
    pub ai_enabled: bool,
    pub auto_mod_enabled: bool,
    pub auto_mod_level: AutoModLevel,
    pub sensitivity: Sensitivity,
}

impl Default for GuildSafetySettings {
    fn default() -> Self {
        Self {
            crisis_alerts_enabled: true,
            ai_enabled: true,
            auto_mod_enabled: false,
            auto_mod_level: AutoModLevel::default(),
            sensitivity: Sensitivity::default(),
        }
    }
}
