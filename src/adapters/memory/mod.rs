//! In-memory adapters.
//!
//! Thread-safe, non-persistent implementations of the record and settings
//! ports. Suitable for tests and single-process hosts. Each adapter can be
//! switched into a failing mode to exercise the failure paths.

mod crisis_events;
mod mod_actions;
mod policy;

pub use crisis_events::InMemoryCrisisEventRepository;
pub use mod_actions::InMemoryModActionRepository;
pub use policy::InMemoryPolicyReader;
