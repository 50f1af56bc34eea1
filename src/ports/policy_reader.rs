//! PolicyReader port - Read-only safety settings.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GuildId, UserId};
use crate::domain::policy::{GuildSafetySettings, UserSafetySettings};

/// Port for reading safety settings.
///
/// `Ok(None)` means no settings are stored and defaults apply. Errors make
/// the policy gate fail closed.
#[async_trait]
pub trait PolicyReader: Send + Sync {
    async fn user_settings(&self, user_id: &UserId) -> Result<Option<UserSafetySettings>, DomainError>;

    async fn guild_settings(&self, guild_id: &GuildId) -> Result<Option<GuildSafetySettings>, DomainError>;
}
