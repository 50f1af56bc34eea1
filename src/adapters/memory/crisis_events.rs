//! In-memory crisis event repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::escalation::{CrisisEvent, NewCrisisEvent};
use crate::domain::foundation::{CrisisEventId, DomainError, ErrorCode, UserId};
use crate::ports::CrisisEventRepository;

/// Stores crisis events in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCrisisEventRepository {
    events: RwLock<Vec<CrisisEvent>>,
    failing: AtomicBool,
    delay_ms: AtomicU64,
}

impl InMemoryCrisisEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes and reads fail.
    pub fn failing() -> Self {
        let repo = Self::new();
        repo.set_failing(true);
        repo
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delays every call, for exercising timeouts.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Snapshot of all stored events.
    pub async fn all(&self) -> Vec<CrisisEvent> {
        self.events.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    async fn guard(&self) -> Result<(), DomainError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Crisis event store unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CrisisEventRepository for InMemoryCrisisEventRepository {
    async fn create(&self, event: NewCrisisEvent) -> Result<CrisisEvent, DomainError> {
        self.guard().await?;
        let event = CrisisEvent::from_new(CrisisEventId::new(), event);
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn find_recent_by_user(&self, user_id: &UserId, limit: usize) -> Result<Vec<CrisisEvent>, DomainError> {
        self.guard().await?;
        let events = self.events.read().await;
        let mut matching: Vec<CrisisEvent> = events
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; ties go to the latest insert.
        matching.sort_by_key(|e| e.detected_at);
        matching.reverse();
        matching.truncate(limit);
        Ok(matching)
    }
}
