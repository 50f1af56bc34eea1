//! Behavior module - per-user sliding-window message statistics.
//!
//! - `limits` - Window, cap and spam thresholds
//! - `record` - One user's recent messages and discipline counters
//! - `tracker` - LRU-bounded owner of all records

mod limits;
mod record;
mod tracker;

pub use limits::BehaviorLimits;
pub use record::{BehaviorAssessment, BehaviorRecord, BehaviorSnapshot};
pub use tracker::BehaviorTracker;
