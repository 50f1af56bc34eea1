//! Policy module - per-user and per-guild safety settings.
//!
//! - `settings` - Settings records and the auto-moderation level
//! - `decision` - Pure policy evaluation for crisis and moderation flows

mod decision;
mod settings;

pub use decision::{
    evaluate_crisis_policy, evaluate_moderation_policy, ModerationPolicy, PolicyDecision,
    PolicyReason,
};
pub use settings::{AutoModLevel, GuildSafetySettings, Sensitivity, UserSafetySettings};
