//! ModeratorAlerter port - Alerts to a guild's moderators.
//!
//! The port carries structured facts only. Rendering and transport belong
//! to the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::detection::{CrisisSeverity, SupportLevel};
use crate::domain::escalation::ModerationAction;
use crate::domain::foundation::{CrisisEventId, DomainError, GuildId, ModActionId, Timestamp, UserId};

/// What an alert is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertSubject {
    Crisis {
        event_id: CrisisEventId,
        severity: CrisisSeverity,
        support_level: SupportLevel,
        /// Earlier crisis events on record for the same user.
        prior_events: usize,
    },
    Moderation {
        action_id: ModActionId,
        action: ModerationAction,
        reason: String,
    },
}

/// A request to alert a guild's moderators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratorAlert {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub subject: AlertSubject,
    pub requires_immediate: bool,
    pub raised_at: Timestamp,
}

/// How an alert request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDelivery {
    Delivered,
    /// The guild has no alert channel; not an error.
    NoChannelConfigured,
}

#[async_trait]
pub trait ModeratorAlerter: Send + Sync {
    async fn alert(&self, alert: &ModeratorAlert) -> Result<AlertDelivery, DomainError>;
}
