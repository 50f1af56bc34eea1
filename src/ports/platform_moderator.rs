//! PlatformModerator port - Moderation actions on the chat platform.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{DomainError, GuildId, MessageId, UserId};

/// Port for executing moderation actions.
///
/// Each call is independent; callers order them and isolate failures.
#[async_trait]
pub trait PlatformModerator: Send + Sync {
    async fn delete_message(&self, guild_id: &GuildId, message_id: &MessageId) -> Result<(), DomainError>;

    async fn warn(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError>;

    async fn mute(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), DomainError>;

    async fn kick(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError>;

    async fn ban(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError>;
}
