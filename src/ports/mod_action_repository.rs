//! ModActionRepository port - Append-only moderation history.

use async_trait::async_trait;

use crate::domain::escalation::{ModAction, NewModAction};
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait ModActionRepository: Send + Sync {
    /// Appends an action and returns the stored record.
    async fn create(&self, action: NewModAction) -> Result<ModAction, DomainError>;

    /// Most recent actions targeting a user, newest first.
    async fn find_recent_by_user(&self, user_id: &UserId, limit: usize) -> Result<Vec<ModAction>, DomainError>;
}
