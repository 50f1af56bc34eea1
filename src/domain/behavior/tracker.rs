//! LRU-bounded behavior tracker.
//!
//! Owns one `BehaviorRecord` per user. The least recently seen user is
//! evicted once `tracked_users` is reached. All mutation happens inside
//! synchronous methods under a `std::sync::Mutex`, so the lock can never be
//! held across an await point.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use super::{BehaviorAssessment, BehaviorLimits, BehaviorRecord, BehaviorSnapshot};
use crate::domain::escalation::ModerationAction;
use crate::domain::foundation::{Timestamp, UserId};

pub struct BehaviorTracker {
    limits: BehaviorLimits,
    records: Mutex<LruCache<UserId, BehaviorRecord>>,
}

impl BehaviorTracker {
    pub fn new(limits: BehaviorLimits) -> Self {
        let capacity = NonZeroUsize::new(limits.tracked_users).unwrap_or(NonZeroUsize::MIN);
        Self {
            limits,
            records: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn limits(&self) -> &BehaviorLimits {
        &self.limits
    }

    /// Records a message and returns the window metrics.
    ///
    /// The record is created on the user's first message.
    pub fn record(&self, user_id: &UserId, content: &str, at: Timestamp) -> BehaviorAssessment {
        let mut records = self.lock();
        let record = records.get_or_insert_mut(user_id.clone(), BehaviorRecord::new);
        record.push(content, at, &self.limits)
    }

    /// Applies an executed moderation action to the user's counters.
    pub fn record_action(&self, user_id: &UserId, action: ModerationAction, at: Timestamp) {
        if action.is_none() {
            return;
        }
        let mut records = self.lock();
        let record = records.get_or_insert_mut(user_id.clone(), BehaviorRecord::new);
        record.apply_action(action, at);
        if action.resets_behavior() {
            tracing::debug!(user_id = %user_id, action = %action, "Behavior counters reset");
        }
    }

    /// Counters for a user; empty when the user is not tracked.
    pub fn snapshot(&self, user_id: &UserId) -> BehaviorSnapshot {
        self.lock()
            .peek(user_id)
            .map(BehaviorRecord::snapshot)
            .unwrap_or_default()
    }

    pub fn tracked_users(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<UserId, BehaviorRecord>> {
        // Poisoned records are still plain counters.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for BehaviorTracker {
    fn default() -> Self {
        Self::new(BehaviorLimits::default())
    }
}
