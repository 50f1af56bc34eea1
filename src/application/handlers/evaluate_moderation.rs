//! EvaluateModeration - Command handler for the auto-moderation flow of one message.

use std::sync::Arc;
use tracing::debug;

use crate::application::classification::{
    ClassificationAdapter, ClassificationOutcome, ClassificationStatus,
};
use crate::application::dispatcher::{
    EscalationDispatcher, EscalationError, ModerationDispatch, ModerationDispatchContext,
};
use crate::application::outcome::{PipelineOutcome, SkipReason};
use crate::application::policy_gate::PolicyGate;
use crate::domain::behavior::{BehaviorAssessment, BehaviorTracker};
use crate::domain::decision::{DecisionEngine, ModerationDecision};
use crate::domain::detection::{ModerationAssessment, SeverityResolver};
use crate::domain::foundation::InboundMessage;
use crate::domain::policy::PolicyReason;

/// Command to run auto-moderation over a message.
#[derive(Debug, Clone)]
pub struct EvaluateModerationCommand {
    pub message: InboundMessage,
}

/// Result of a moderation evaluation that reached the decision stage.
#[derive(Debug, Clone)]
pub struct ModerationEvaluation {
    pub assessment: ModerationAssessment,
    pub behavior: BehaviorAssessment,
    pub decision: ModerationDecision,
    pub classification: ClassificationStatus,
    /// Present only when an action was decided.
    pub dispatch: Option<ModerationDispatch>,
}

/// Handler for the auto-moderation flow.
pub struct EvaluateModerationHandler {
    gate: Arc<PolicyGate>,
    classification: Arc<ClassificationAdapter>,
    dispatcher: Arc<EscalationDispatcher>,
    tracker: Arc<BehaviorTracker>,
    resolver: SeverityResolver,
    engine: DecisionEngine,
}

impl EvaluateModerationHandler {
    pub fn new(
        gate: Arc<PolicyGate>,
        classification: Arc<ClassificationAdapter>,
        dispatcher: Arc<EscalationDispatcher>,
        tracker: Arc<BehaviorTracker>,
        engine: DecisionEngine,
    ) -> Self {
        Self {
            gate,
            classification,
            dispatcher,
            tracker,
            resolver: SeverityResolver::new(),
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateModerationCommand,
    ) -> Result<PipelineOutcome<ModerationEvaluation>, EscalationError> {
        let message = &cmd.message;
        let user_id = &message.author_id;

        // 1. Policy gate
        let policy = self.gate.authorize_moderation(message.guild_id.as_ref()).await;
        let guild_id = match (&message.guild_id, policy.enabled) {
            (Some(guild_id), true) => guild_id,
            (None, _) => {
                return Ok(PipelineOutcome::skipped(SkipReason::PolicyDisabled(
                    PolicyReason::DirectMessage,
                )))
            }
            (Some(_), false) => {
                debug!(user_id = %user_id, reason = %policy.reason, "Auto-moderation disabled");
                return Ok(PipelineOutcome::skipped(SkipReason::PolicyDisabled(policy.reason)));
            }
        };

        // 2. Content classification
        let classification = if policy.classifier_allowed && !message.text.trim().is_empty() {
            self.classification.classify(&message.text).await
        } else {
            ClassificationOutcome::skipped()
        };
        let assessment = self.resolver.resolve_moderation(&classification.signal);

        // 3. Behavior window
        let behavior = self
            .tracker
            .record(user_id, &message.text, message.created_at);
        let snapshot = self.tracker.snapshot(user_id);

        // 4. Decide
        let decision = self
            .engine
            .decide_moderation(&assessment, &behavior, &snapshot, &policy);

        debug!(
            user_id = %user_id,
            guild_id = %guild_id,
            level = %policy.level,
            content_score = assessment.content_score,
            messages_per_minute = behavior.messages_per_minute,
            repetition_ratio = behavior.repetition_ratio,
            action = %decision.action,
            "Moderation assessed"
        );

        // 5. Act
        let dispatch = if decision.is_action() {
            Some(
                self.dispatcher
                    .dispatch_moderation(
                        &decision,
                        ModerationDispatchContext {
                            guild_id,
                            user_id,
                            message_id: message.message_id.as_ref(),
                            at: message.created_at,
                        },
                    )
                    .await?,
            )
        } else {
            None
        };

        Ok(PipelineOutcome::Evaluated(ModerationEvaluation {
            assessment,
            behavior,
            decision,
            classification: classification.status,
            dispatch,
        }))
    }
}
