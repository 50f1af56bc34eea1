//! Crisis decisions.

use serde::{Deserialize, Serialize};

use crate::domain::detection::{CrisisSeverity, SupportLevel};

/// Kind of supportive response to offer; the reply text is produced elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportTier {
    None,
    CheckIn,
    Resources,
    CrisisResources,
    EmergencyResources,
}

impl SupportTier {
    pub fn for_level(level: SupportLevel) -> Self {
        match level {
            SupportLevel::Stable => SupportTier::None,
            SupportLevel::Mild => SupportTier::CheckIn,
            SupportLevel::Moderate => SupportTier::Resources,
            SupportLevel::Elevated => SupportTier::CrisisResources,
            SupportLevel::Urgent => SupportTier::EmergencyResources,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportTier::None => "none",
            SupportTier::CheckIn => "check_in",
            SupportTier::Resources => "resources",
            SupportTier::CrisisResources => "crisis_resources",
            SupportTier::EmergencyResources => "emergency_resources",
        }
    }
}

/// Outcome of the crisis decision for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisDecision {
    pub escalate: bool,
    pub requires_immediate: bool,
    pub severity: CrisisSeverity,
    pub support_level: SupportLevel,
    pub support_tier: SupportTier,
}
