//! Moderation decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::escalation::ModerationAction;

/// What caused a moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationTrigger {
    Content,
    Repetition,
    Frequency,
}

impl ModerationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationTrigger::Content => "content",
            ModerationTrigger::Repetition => "repetition",
            ModerationTrigger::Frequency => "frequency",
        }
    }
}

impl fmt::Display for ModerationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progressive discipline limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRules {
    /// A warn becomes a mute once the user holds this many warnings.
    pub max_warnings: u32,
    /// A mute becomes a kick once the user holds this many mutes.
    pub max_mutes: u32,
}

impl Default for ModerationRules {
    fn default() -> Self {
        Self {
            max_warnings: 3,
            max_mutes: 3,
        }
    }
}

/// Outcome of the moderation decision for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationDecision {
    pub action: ModerationAction,
    pub trigger: Option<ModerationTrigger>,
    pub reason: String,
    pub requires_immediate: bool,
}

impl ModerationDecision {
    pub fn none() -> Self {
        Self {
            action: ModerationAction::None,
            trigger: None,
            reason: String::new(),
            requires_immediate: false,
        }
    }

    pub fn is_action(&self) -> bool {
        !self.action.is_none()
    }
}
