//! Behavior window limits.

use serde::{Deserialize, Serialize};

/// Limits applied to every behavior record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorLimits {
    /// Entries older than this, relative to the newest, are pruned.
    pub window_secs: i64,
    /// Maximum entries kept per user.
    pub max_entries: usize,
    /// Metrics are neutral below this many in-window messages.
    pub min_messages: usize,
    /// Span floor used for the frequency calculation.
    pub min_span_secs: i64,
    /// Frequency above this is spam.
    pub max_messages_per_minute: f64,
    /// Distinct-content ratio below this is spam.
    pub min_repetition_ratio: f64,
    /// Maximum users held before the least recently seen is evicted.
    pub tracked_users: usize,
}

impl Default for BehaviorLimits {
    fn default() -> Self {
        Self {
            window_secs: 3600,
            max_entries: 10,
            min_messages: 5,
            min_span_secs: 30,
            max_messages_per_minute: 15.0,
            min_repetition_ratio: 0.3,
            tracked_users: 10_000,
        }
    }
}
