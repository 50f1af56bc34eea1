//! Detection module - turning message text into ordered risk levels.
//!
//! - `category` - Internal category vocabulary and external name mapping
//! - `signal` - Per-stage signal types (`PatternSignal`, `ClassifierSignal`)
//! - `patterns` - Keyword and contextual pattern scan (cheap pre-filter)
//! - `ladder` - Data-driven threshold ladders
//! - `severity` - Crisis and moderation severity resolution

mod category;
mod ladder;
mod patterns;
mod severity;
mod signal;

pub use category::RiskCategory;
pub use ladder::{Predicate, ThresholdLadder};
pub use patterns::PatternMatcher;
pub use severity::{
    ConcernArea, ConcernBucket, CrisisSeverity, ModerationAssessment, SeverityAssessment,
    SeverityResolver, SupportLevel,
};
pub use signal::{
    ClassifierSignal, ConfidenceTier, KeywordCategory, PatternKind, PatternMatch, PatternSignal,
    PatternTarget, ScanSkip, SignalSource,
};
