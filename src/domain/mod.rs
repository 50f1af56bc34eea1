//! Domain layer containing the safety decision logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, messages, errors)
//! - `detection` - Pattern matching, category vocabulary and severity resolution
//! - `behavior` - Per-user sliding-window message statistics
//! - `policy` - User and guild safety settings and gate decisions
//! - `decision` - Crisis and moderation decision rules
//! - `escalation` - Persisted records (crisis events, moderation actions)

pub mod behavior;
pub mod decision;
pub mod detection;
pub mod escalation;
pub mod foundation;
pub mod policy;
