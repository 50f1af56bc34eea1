//! In-memory moderation action repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::escalation::{ModAction, NewModAction};
use crate::domain::foundation::{DomainError, ErrorCode, ModActionId, UserId};
use crate::ports::ModActionRepository;

/// Append-only action log.
#[derive(Debug, Default)]
pub struct InMemoryModActionRepository {
    actions: RwLock<Vec<ModAction>>,
    failing: AtomicBool,
}

impl InMemoryModActionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repo = Self::new();
        repo.set_failing(true);
        repo
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<ModAction> {
        self.actions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.actions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.actions.read().await.is_empty()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Moderation action store unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ModActionRepository for InMemoryModActionRepository {
    async fn create(&self, action: NewModAction) -> Result<ModAction, DomainError> {
        self.check()?;
        let action = ModAction::from_new(ModActionId::new(), action);
        self.actions.write().await.push(action.clone());
        Ok(action)
    }

    async fn find_recent_by_user(&self, user_id: &UserId, limit: usize) -> Result<Vec<ModAction>, DomainError> {
        self.check()?;
        let actions = self.actions.read().await;
        let mut matching: Vec<ModAction> = actions
            .iter()
            .filter(|a| &a.target_user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.created_at);
        matching.reverse();
        matching.truncate(limit);
        Ok(matching)
    }
}
