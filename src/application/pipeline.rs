//! Safety pipeline facade.
//!
//! Wires the policy gate, classification adapter, behavior tracker and
//! escalation dispatcher from a set of ports, and exposes one entry point
//! per flow. The crisis and moderation flows share the classifier, the
//! policy reader and the tracker.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::classification::ClassificationAdapter;
use super::dispatcher::{DispatchSettings, EscalationDispatcher, EscalationError};
use super::handlers::{
    CrisisEvaluation, EvaluateCrisisCommand, EvaluateCrisisHandler, EvaluateModerationCommand,
    EvaluateModerationHandler, ModerationEvaluation,
};
use super::outcome::PipelineOutcome;
use super::policy_gate::PolicyGate;
use crate::adapters::classifier::HttpContentClassifier;
use crate::config::AppConfig;
use crate::domain::behavior::{BehaviorLimits, BehaviorTracker};
use crate::domain::decision::{DecisionEngine, ModerationRules};
use crate::domain::foundation::{DomainError, InboundMessage};
use crate::ports::{
    ContentClassifier, CrisisEventRepository, ModActionRepository, ModeratorAlerter,
    PlatformModerator, PolicyReader, SupportMessenger,
};

/// Collaborators the pipeline talks to.
#[derive(Clone)]
pub struct PipelinePorts {
    /// `None` runs pattern-only.
    pub classifier: Option<Arc<dyn ContentClassifier>>,
    pub policy_reader: Arc<dyn PolicyReader>,
    pub crisis_events: Arc<dyn CrisisEventRepository>,
    pub mod_actions: Arc<dyn ModActionRepository>,
    pub alerter: Arc<dyn ModeratorAlerter>,
    pub messenger: Arc<dyn SupportMessenger>,
    pub platform: Arc<dyn PlatformModerator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub classifier_timeout: Duration,
    pub policy_timeout: Duration,
    pub dispatch: DispatchSettings,
    pub limits: BehaviorLimits,
    pub rules: ModerationRules,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            classifier_timeout: config.classifier.timeout(),
            policy_timeout: config.timeouts.policy_read(),
            dispatch: DispatchSettings {
                persistence_timeout: config.timeouts.persistence(),
                downstream_timeout: config.timeouts.downstream(),
                mute_duration: config.moderation.mute_duration(),
            },
            limits: config.behavior.limits(),
            rules: config.moderation.rules(),
        }
    }
}

pub struct SafetyPipeline {
    crisis: EvaluateCrisisHandler,
    moderation: EvaluateModerationHandler,
    classification: Arc<ClassificationAdapter>,
    tracker: Arc<BehaviorTracker>,
}

impl SafetyPipeline {
    pub fn new(ports: PipelinePorts, settings: PipelineSettings) -> Self {
        let engine = DecisionEngine::new(settings.rules).with_limits(settings.limits.clone());
        let tracker = Arc::new(BehaviorTracker::new(settings.limits));
        let gate = Arc::new(PolicyGate::new(ports.policy_reader, settings.policy_timeout));
        let classification = Arc::new(ClassificationAdapter::new(
            ports.classifier,
            settings.classifier_timeout,
        ));
        let dispatcher = Arc::new(EscalationDispatcher::new(
            ports.crisis_events,
            ports.mod_actions,
            ports.alerter,
            ports.messenger,
            ports.platform,
            tracker.clone(),
            settings.dispatch,
        ));

        Self {
            crisis: EvaluateCrisisHandler::new(
                gate.clone(),
                classification.clone(),
                dispatcher.clone(),
                engine.clone(),
            ),
            moderation: EvaluateModerationHandler::new(
                gate,
                classification.clone(),
                dispatcher,
                tracker.clone(),
                engine,
            ),
            classification,
            tracker,
        }
    }

    /// Builds the pipeline from loaded configuration.
    ///
    /// When `ports` carries no classifier and an endpoint is configured, the
    /// HTTP classifier is created here.
    pub fn from_config(config: &AppConfig, mut ports: PipelinePorts) -> Result<Self, DomainError> {
        if ports.classifier.is_none() {
            if let Some(http) = config.classifier.http_config() {
                info!(endpoint = %http.endpoint, "Using HTTP content classifier");
                ports.classifier = Some(Arc::new(HttpContentClassifier::new(http)?));
            }
        }
        if ports.classifier.is_none() {
            info!("No content classifier configured, running pattern-only");
        }
        Ok(Self::new(ports, PipelineSettings::from(config)))
    }

    pub async fn evaluate_crisis(
        &self,
        message: &InboundMessage,
    ) -> Result<PipelineOutcome<CrisisEvaluation>, EscalationError> {
        self.crisis
            .handle(EvaluateCrisisCommand {
                message: message.clone(),
            })
            .await
    }

    pub async fn evaluate_moderation(
        &self,
        message: &InboundMessage,
    ) -> Result<PipelineOutcome<ModerationEvaluation>, EscalationError> {
        self.moderation
            .handle(EvaluateModerationCommand {
                message: message.clone(),
            })
            .await
    }

    pub fn classifier_configured(&self) -> bool {
        self.classification.is_configured()
    }

    /// The behavior tracker shared by the moderation flow.
    pub fn tracker(&self) -> &BehaviorTracker {
        &self.tracker
    }
}
