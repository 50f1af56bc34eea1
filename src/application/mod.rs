//! Application layer - Orchestration of the safety flows.
//!
//! Each stage wraps its collaborator calls in explicit timeouts and decides
//! locally how a failure is recovered:
//!
//! - `policy_gate` - Reads settings, fails closed
//! - `classification` - Calls the classifier, falls back to zero scores
//! - `dispatcher` - Persists records, then alerts and acts in isolation
//! - `handlers` - Crisis and moderation flows per message
//! - `pipeline` - Facade wiring everything from ports and settings

mod bounded;
pub mod classification;
pub mod dispatcher;
pub mod handlers;
mod outcome;
pub mod pipeline;
pub mod policy_gate;

pub use classification::{ClassificationAdapter, ClassificationOutcome, ClassificationStatus};
pub use dispatcher::{
    CrisisDispatch, CrisisDispatchContext, DispatchResult, DispatchSettings, EscalationDispatcher,
    EscalationError, ModerationDispatch, ModerationDispatchContext,
};
pub use handlers::{
    CrisisEvaluation, EvaluateCrisisCommand, EvaluateCrisisHandler, EvaluateModerationCommand,
    EvaluateModerationHandler, ModerationEvaluation,
};
pub use outcome::{PipelineOutcome, SkipReason};
pub use pipeline::{PipelinePorts, PipelineSettings, SafetyPipeline};
pub use policy_gate::PolicyGate;
