//! In-memory policy reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, GuildId, UserId};
use crate::domain::policy::{GuildSafetySettings, UserSafetySettings};
use crate::ports::PolicyReader;

/// Settings held in maps; unknown ids read as `None`.
#[derive(Debug, Default)]
pub struct InMemoryPolicyReader {
    users: RwLock<HashMap<UserId, UserSafetySettings>>,
    guilds: RwLock<HashMap<GuildId, GuildSafetySettings>>,
    failing: AtomicBool,
    delay_ms: AtomicU64,
    reads: AtomicUsize,
}

impl InMemoryPolicyReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let reader = Self::new();
        reader.set_failing(true);
        reader
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delays every read, for exercising timeouts.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn put_user(&self, user_id: UserId, settings: UserSafetySettings) {
        self.users.write().await.insert(user_id, settings);
    }

    pub async fn put_guild(&self, guild_id: GuildId, settings: GuildSafetySettings) {
        self.guilds.write().await.insert(guild_id, settings);
    }

    /// Number of reads attempted, including failed ones.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    async fn guard(&self) -> Result<(), DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::PolicyUnavailable,
                "Settings store unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PolicyReader for InMemoryPolicyReader {
    async fn user_settings(&self, user_id: &UserId) -> Result<Option<UserSafetySettings>, DomainError> {
        self.guard().await?;
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn guild_settings(&self, guild_id: &GuildId) -> Result<Option<GuildSafetySettings>, DomainError> {
        self.guard().await?;
        Ok(self.guilds.read().await.get(guild_id).cloned())
    }
}
