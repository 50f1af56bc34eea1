//! Per-message application handlers.
//!
//! - `evaluate_crisis` - Policy, scan, classify, resolve, decide, escalate
//! - `evaluate_moderation` - Policy, classify, track behavior, decide, act

mod evaluate_crisis;
mod evaluate_moderation;

pub use evaluate_crisis::{CrisisEvaluation, EvaluateCrisisCommand, EvaluateCrisisHandler};
pub use evaluate_moderation::{
    EvaluateModerationCommand, EvaluateModerationHandler, ModerationEvaluation,
};
