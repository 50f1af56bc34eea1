//! CrisisEventRepository port - Persisted crisis escalations.

use async_trait::async_trait;

use crate::domain::escalation::{CrisisEvent, NewCrisisEvent};
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for crisis events.
///
/// Events are immutable once created.
#[async_trait]
pub trait CrisisEventRepository: Send + Sync {
    /// Persists a new event and returns the stored record.
    async fn create(&self, event: NewCrisisEvent) -> Result<CrisisEvent, DomainError>;

    /// Most recent events for a user, newest first.
    async fn find_recent_by_user(&self, user_id: &UserId, limit: usize) -> Result<Vec<CrisisEvent>, DomainError>;
}
