//! EvaluateCrisis - Command handler for the crisis flow of one message.

use std::sync::Arc;
use tracing::{debug, info};

use crate::application::classification::{
    ClassificationAdapter, ClassificationOutcome, ClassificationStatus,
};
use crate::application::dispatcher::{
    CrisisDispatch, CrisisDispatchContext, EscalationDispatcher, EscalationError,
};
use crate::application::outcome::{PipelineOutcome, SkipReason};
use crate::application::policy_gate::PolicyGate;
use crate::domain::decision::{CrisisDecision, DecisionEngine};
use crate::domain::detection::{PatternMatcher, SeverityAssessment, SeverityResolver};
use crate::domain::escalation::CrisisEventDetails;
use crate::domain::foundation::InboundMessage;
use crate::domain::policy::Sensitivity;

/// Command to run crisis detection over a message.
#[derive(Debug, Clone)]
pub struct EvaluateCrisisCommand {
    pub message: InboundMessage,
}

/// Result of a crisis evaluation that reached the decision stage.
#[derive(Debug, Clone)]
pub struct CrisisEvaluation {
    pub assessment: SeverityAssessment,
    pub decision: CrisisDecision,
    pub classification: ClassificationStatus,
    /// Present only when the decision escalated.
    pub dispatch: Option<CrisisDispatch>,
}

/// Handler for the crisis flow.
pub struct EvaluateCrisisHandler {
    gate: Arc<PolicyGate>,
    classification: Arc<ClassificationAdapter>,
    dispatcher: Arc<EscalationDispatcher>,
    matcher: PatternMatcher,
    resolver: SeverityResolver,
    engine: DecisionEngine,
}

impl EvaluateCrisisHandler {
    pub fn new(
        gate: Arc<PolicyGate>,
        classification: Arc<ClassificationAdapter>,
        dispatcher: Arc<EscalationDispatcher>,
        engine: DecisionEngine,
    ) -> Self {
        Self {
            gate,
            classification,
            dispatcher,
            matcher: PatternMatcher::new(),
            resolver: SeverityResolver::new(),
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateCrisisCommand,
    ) -> Result<PipelineOutcome<CrisisEvaluation>, EscalationError> {
        let message = &cmd.message;
        let user_id = &message.author_id;

        // 1. Policy gate
        let policy = self.gate.authorize(user_id, message.guild_id.as_ref()).await;
        if !policy.enabled {
            debug!(user_id = %user_id, reason = %policy.reason, "Crisis checks disabled");
            return Ok(PipelineOutcome::skipped(SkipReason::PolicyDisabled(policy.reason)));
        }

        // 2. Cheap pattern gate
        let pattern = self.matcher.scan(&message.text);
        if let Some(skip) = pattern.skipped {
            debug!(user_id = %user_id, reason = skip.as_str(), "Crisis scan skipped");
            return Ok(PipelineOutcome::skipped(skip));
        }

        // 3. Classifier, when the policy allows and the message warrants it
        let wants_classifier = pattern.has_signal() || policy.sensitivity == Sensitivity::High;
        let classification = if policy.classifier_allowed && wants_classifier {
            self.classification.classify(&message.text).await
        } else {
            ClassificationOutcome::skipped()
        };

        if !pattern.has_signal() && !classification.was_consulted() {
            debug!(user_id = %user_id, "No risk signal");
            return Ok(PipelineOutcome::skipped(SkipReason::NoRiskSignal));
        }

        // 4. Resolve and decide
        let assessment = self.resolver.resolve(&pattern, &classification.signal);
        let decision = self.engine.decide_crisis(&assessment, &policy);

        debug!(
            user_id = %user_id,
            severity = %decision.severity,
            support_level = %decision.support_level,
            confidence = %assessment.confidence,
            escalate = decision.escalate,
            "Crisis assessed"
        );

        // 5. Escalate
        let dispatch = if decision.escalate {
            let details = CrisisEventDetails::from_assessment(
                &assessment,
                &pattern,
                classification.was_consulted(),
            );
            let dispatch = self
                .dispatcher
                .dispatch_crisis(
                    &decision,
                    CrisisDispatchContext {
                        user_id,
                        guild_id: message.guild_id.as_ref(),
                        detected_at: message.created_at,
                        policy: &policy,
                        details,
                    },
                )
                .await?;
            info!(
                user_id = %user_id,
                event_id = %dispatch.event.id,
                requires_immediate = decision.requires_immediate,
                "Crisis event recorded"
            );
            Some(dispatch)
        } else {
            None
        };

        Ok(PipelineOutcome::Evaluated(CrisisEvaluation {
            assessment,
            decision,
            classification: classification.status,
            dispatch,
        }))
    }
}
