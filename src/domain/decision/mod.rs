//! Decision module - turning assessments and policy into actions.
//!
//! - `crisis` - Escalation decision and support tier
//! - `moderation` - Moderation triggers and progressive discipline
//! - `engine` - The decision engine combining both

mod crisis;
mod engine;
mod moderation;

pub use crisis::{CrisisDecision, SupportTier};
pub use engine::{content_threshold, frequency_bound, DecisionEngine};
pub use moderation::{ModerationDecision, ModerationRules, ModerationTrigger};
