//! Crisis event records.
//!
//! A crisis event is written once, when the decision engine escalates, and
//! never changes afterwards. The details are a summary of the assessment;
//! message text is never stored.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::detection::{
    ConcernArea, ConfidenceTier, CrisisSeverity, PatternSignal, SeverityAssessment, SupportLevel,
};
use crate::domain::foundation::{CrisisEventId, GuildId, Timestamp, UserId};

/// Assessment summary stored with a crisis event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisEventDetails {
    pub severity: CrisisSeverity,
    pub support_level: SupportLevel,
    pub confidence: ConfidenceTier,
    pub concern_areas: Vec<ConcernArea>,
    pub matched_patterns: Vec<String>,
    pub forced_by_pattern: bool,
    pub classifier_consulted: bool,
}

impl CrisisEventDetails {
    pub fn from_assessment(
        assessment: &SeverityAssessment,
        pattern: &PatternSignal,
        classifier_consulted: bool,
    ) -> Self {
        Self {
            severity: assessment.level,
            support_level: assessment.support_level,
            confidence: assessment.confidence,
            concern_areas: assessment.concern_areas.clone(),
            matched_patterns: pattern.pattern_ids().into_iter().collect(),
            forced_by_pattern: assessment.forced_by_pattern,
            classifier_consulted,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Fields for a crisis event that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCrisisEvent {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub detected_at: Timestamp,
    pub escalated: bool,
    pub details: CrisisEventDetails,
}

/// A persisted crisis event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisEvent {
    pub id: CrisisEventId,
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub detected_at: Timestamp,
    pub escalated: bool,
    pub details: JsonValue,
}

impl CrisisEvent {
    /// Materializes a new event under a freshly assigned id.
    pub fn from_new(id: CrisisEventId, new: NewCrisisEvent) -> Self {
        Self {
            id,
            user_id: new.user_id,
            guild_id: new.guild_id,
            detected_at: new.detected_at,
            escalated: new.escalated,
            details: new.details.to_json(),
        }
    }

    /// Severity recorded in the details, if readable.
    pub fn severity(&self) -> Option<CrisisSeverity> {
        self.details
            .get("severity")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
