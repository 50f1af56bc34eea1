//! Ordered moderation actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation action, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    #[default]
    None,
    Warn,
    Mute,
    Kick,
    Ban,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::None => "none",
            ModerationAction::Warn => "warn",
            ModerationAction::Mute => "mute",
            ModerationAction::Kick => "kick",
            ModerationAction::Ban => "ban",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ModerationAction::None)
    }

    /// Kick and ban remove the user, so their behavior counters start over.
    pub fn resets_behavior(&self) -> bool {
        matches!(self, ModerationAction::Kick | ModerationAction::Ban)
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
