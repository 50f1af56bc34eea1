//! A single user's behavior record.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::BehaviorLimits;
use crate::domain::escalation::ModerationAction;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone)]
struct Entry {
    normalized: String,
    length: usize,
    at: Timestamp,
}

/// Metrics computed after recording a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorAssessment {
    /// False when too few messages were in the window to judge.
    pub evaluated: bool,
    pub message_count: usize,
    /// Span used for the frequency calculation, after flooring.
    pub window_secs: i64,
    pub messages_per_minute: f64,
    /// Distinct messages over total; 1.0 means no repeats.
    pub repetition_ratio: f64,
    pub average_length: f64,
    pub is_repetitive: bool,
    pub is_spamming: bool,
}

impl BehaviorAssessment {
    /// Assessment for a window too small to judge.
    pub fn neutral(message_count: usize) -> Self {
        Self {
            evaluated: false,
            message_count,
            window_secs: 0,
            messages_per_minute: 0.0,
            repetition_ratio: 1.0,
            average_length: 0.0,
            is_repetitive: false,
            is_spamming: false,
        }
    }
}

/// Read-only view of a record's counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSnapshot {
    pub message_count: usize,
    pub warnings: u32,
    pub last_warning_at: Option<Timestamp>,
    pub mutes: u32,
    pub last_mute_at: Option<Timestamp>,
    pub oldest_message_at: Option<Timestamp>,
    pub newest_message_at: Option<Timestamp>,
}

/// Recent messages and discipline counters for one user.
///
/// Entries stay in insertion order. After every append the record holds at
/// most `max_entries` entries, none older than `window_secs` relative to the
/// newest entry.
#[derive(Debug, Clone, Default)]
pub struct BehaviorRecord {
    entries: VecDeque<Entry>,
    warnings: u32,
    last_warning_at: Option<Timestamp>,
    mutes: u32,
    last_mute_at: Option<Timestamp>,
}

impl BehaviorRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, prunes the window and computes metrics.
    pub fn push(&mut self, content: &str, at: Timestamp, limits: &BehaviorLimits) -> BehaviorAssessment {
        self.entries.push_back(Entry {
            normalized: normalize(content),
            length: content.chars().count(),
            at,
        });
        self.prune(limits);
        self.assess(limits)
    }

    fn prune(&mut self, limits: &BehaviorLimits) {
        if let Some(newest) = self.newest() {
            let window_ms = limits.window_secs.saturating_mul(1000);
            self.entries.retain(|entry| {
                newest.duration_since(&entry.at).num_milliseconds() <= window_ms
            });
        }
        while self.entries.len() > limits.max_entries {
            self.entries.pop_front();
        }
    }

    fn assess(&self, limits: &BehaviorLimits) -> BehaviorAssessment {
        let count = self.entries.len();
        if count < limits.min_messages || count == 0 {
            return BehaviorAssessment::neutral(count);
        }

        let span = match (self.oldest(), self.newest()) {
            (Some(oldest), Some(newest)) => newest.secs_since(&oldest),
            _ => 0,
        };
        let window_secs = span.max(limits.min_span_secs).max(1);
        let messages_per_minute = count as f64 * 60.0 / window_secs as f64;

        let distinct: HashSet<&str> = self.entries.iter().map(|e| e.normalized.as_str()).collect();
        let repetition_ratio = distinct.len() as f64 / count as f64;

        let total_length: usize = self.entries.iter().map(|e| e.length).sum();
        let average_length = total_length as f64 / count as f64;

        let is_repetitive = repetition_ratio < limits.min_repetition_ratio;
        let is_spamming = messages_per_minute > limits.max_messages_per_minute || is_repetitive;

        BehaviorAssessment {
            evaluated: true,
            message_count: count,
            window_secs,
            messages_per_minute,
            repetition_ratio,
            average_length,
            is_repetitive,
            is_spamming,
        }
    }

    /// Updates discipline counters after an executed action.
    pub fn apply_action(&mut self, action: ModerationAction, at: Timestamp) {
        match action {
            ModerationAction::Warn => {
                self.warnings += 1;
                self.last_warning_at = Some(at);
            }
            ModerationAction::Mute => {
                self.mutes += 1;
                self.last_mute_at = Some(at);
            }
            ModerationAction::Kick | ModerationAction::Ban => {
                self.warnings = 0;
                self.last_warning_at = None;
                self.mutes = 0;
                self.last_mute_at = None;
            }
            ModerationAction::None => {}
        }
    }

    pub fn snapshot(&self) -> BehaviorSnapshot {
        BehaviorSnapshot {
            message_count: self.entries.len(),
            warnings: self.warnings,
            last_warning_at: self.last_warning_at,
            mutes: self.mutes,
            last_mute_at: self.last_mute_at,
            oldest_message_at: self.oldest(),
            newest_message_at: self.newest(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn oldest(&self) -> Option<Timestamp> {
        self.entries.iter().map(|e| e.at).min()
    }

    fn newest(&self) -> Option<Timestamp> {
        self.entries.iter().map(|e| e.at).max()
    }

    #[cfg(test)]
    fn timestamps(&self) -> Vec<Timestamp> {
        self.entries.iter().map(|e| e.at).collect()
    }
}

/// Case and whitespace insensitive form used for repetition.
fn normalize(content: &str) -> String {
    content
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Timestamp {
        Timestamp::now()
    }

    #[test]
    fn fewer_than_five_messages_is_neutral() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        let mut last = BehaviorAssessment::neutral(0);
        for i in 0..4 {
            last = record.push("same", start.plus_secs(i), &limits);
        }
        assert!(!last.evaluated);
        assert!(!last.is_spamming);
        assert_eq!(last.message_count, 4);
    }

    #[test]
    fn identical_burst_is_spam() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        let mut last = BehaviorAssessment::neutral(0);
        for i in 0..6 {
            last = record.push("BUY NOW", start.plus_secs(i * 4), &limits);
        }
        assert!(last.evaluated);
        assert_eq!(last.window_secs, 30);
        assert!((last.messages_per_minute - 12.0).abs() < 1e-9);
        assert!(last.repetition_ratio < 0.3);
        assert!(last.is_repetitive);
        assert!(last.is_spamming);
    }

    #[test]
    fn short_span_is_floored() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        let mut last = BehaviorAssessment::neutral(0);
        for i in 0..5 {
            last = record.push(&format!("message {}", i), start, &limits);
        }
        assert_eq!(last.window_secs, 30);
        assert!((last.messages_per_minute - 10.0).abs() < 1e-9);
        assert!(!last.is_spamming);
    }

    #[test]
    fn high_frequency_is_spam() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        let mut last = BehaviorAssessment::neutral(0);
        for i in 0..10 {
            last = record.push(&format!("distinct {}", i), start.plus_secs(i * 3), &limits);
        }
        // 10 messages over 30s is 20 per minute.
        assert_eq!(last.repetition_ratio, 1.0);
        assert!(last.messages_per_minute > 15.0);
        assert!(last.is_spamming);
        assert!(!last.is_repetitive);
    }

    #[test]
    fn repetition_ignores_case_and_whitespace() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        let texts = ["Hello  world", "hello world", " HELLO world ", "hello\tWorld", "hello world"];
        let mut last = BehaviorAssessment::neutral(0);
        for (i, text) in texts.iter().enumerate() {
            last = record.push(text, start.plus_secs(i as i64 * 60), &limits);
        }
        assert!((last.repetition_ratio - 0.2).abs() < 1e-9);
    }

    #[test]
    fn old_entries_are_pruned_relative_to_newest() {
        let limits = BehaviorLimits::default();
        let mut record = BehaviorRecord::new();
        let start = base();
        record.push("first", start, &limits);
        record.push("second", start.plus_secs(3000), &limits);
        record.push("third", start.plus_secs(3601), &limits);
        assert_eq!(record.len(), 2);
        assert_eq!(record.snapshot().oldest_message_at, Some(start.plus_secs(3000)));
    }

    #[test]
    fn counters_track_and_reset() {
        let mut record = BehaviorRecord::new();
        let at = base();
        record.apply_action(ModerationAction::Warn, at);
        record.apply_action(ModerationAction::Warn, at);
        record.apply_action(ModerationAction::Mute, at);

        let snapshot = record.snapshot();
        assert_eq!(snapshot.warnings, 2);
        assert_eq!(snapshot.mutes, 1);
        assert_eq!(snapshot.last_mute_at, Some(at));

        record.apply_action(ModerationAction::Kick, at);
        let snapshot = record.snapshot();
        assert_eq!(snapshot.warnings, 0);
        assert_eq!(snapshot.mutes, 0);
        assert_eq!(snapshot.last_warning_at, None);
    }

    proptest! {
        #[test]
        fn window_never_exceeds_limits(offsets in prop::collection::vec(0i64..20_000, 1..60)) {
            let limits = BehaviorLimits::default();
            let mut record = BehaviorRecord::new();
            let start = base();
            for (i, offset) in offsets.iter().enumerate() {
                record.push(&format!("m{}", i % 3), start.plus_secs(*offset), &limits);

                let stamps = record.timestamps();
                prop_assert!(stamps.len() <= limits.max_entries);
                let newest = stamps.iter().max().copied().unwrap();
                for stamp in &stamps {
                    prop_assert!(newest.secs_since(stamp) <= limits.window_secs);
                }
            }
        }
    }
}
