//! Moderation action records (append-only).

use serde::{Deserialize, Serialize};

use super::ModerationAction;
use crate::domain::foundation::{GuildId, ModActionId, Timestamp, UserId};

/// Fields for a moderation action that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewModAction {
    pub guild_id: GuildId,
    /// `UserId::system()` for automated actions.
    pub moderator_id: UserId,
    pub target_user_id: UserId,
    pub action: ModerationAction,
    pub reason: String,
    pub created_at: Timestamp,
}

impl NewModAction {
    /// An action taken by the automated moderator.
    pub fn automated(
        guild_id: GuildId,
        target_user_id: UserId,
        action: ModerationAction,
        reason: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            guild_id,
            moderator_id: UserId::system(),
            target_user_id,
            action,
            reason: reason.into(),
            created_at,
        }
    }
}

/// A persisted moderation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModAction {
    pub id: ModActionId,
    pub guild_id: GuildId,
    pub moderator_id: UserId,
    pub target_user_id: UserId,
    pub action: ModerationAction,
    pub reason: String,
    pub created_at: Timestamp,
}

impl ModAction {
    pub fn from_new(id: ModActionId, new: NewModAction) -> Self {
        Self {
            id,
            guild_id: new.guild_id,
            moderator_id: new.moderator_id,
            target_user_id: new.target_user_id,
            action: new.action,
            reason: new.reason,
            created_at: new.created_at,
        }
    }

    pub fn is_automated(&self) -> bool {
        self.moderator_id == UserId::system()
    }
}
