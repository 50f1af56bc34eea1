//! Escalation module - records of decided interventions.
//!
//! - `action` - Ordered moderation actions
//! - `crisis_event` - Persisted crisis escalation records
//! - `mod_action` - Append-only moderation action records

mod action;
mod crisis_event;
mod mod_action;

pub use action::ModerationAction;
pub use crisis_event::{CrisisEvent, CrisisEventDetails, NewCrisisEvent};
pub use mod_action::{ModAction, NewModAction};
