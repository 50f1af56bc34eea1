//! Adapters - Implementations of port interfaces.
//!
//! - `classifier` - HTTP and static content classifiers
//! - `memory` - In-memory repositories and settings
//! - `notify` - Recording notifier for alerts, support and platform actions

pub mod classifier;
pub mod memory;
pub mod notify;

pub use classifier::{HttpClassifierConfig, HttpContentClassifier, StaticClassifier};
pub use memory::{InMemoryCrisisEventRepository, InMemoryModActionRepository, InMemoryPolicyReader};
pub use notify::{NotifierCall, RecordingNotifier};
