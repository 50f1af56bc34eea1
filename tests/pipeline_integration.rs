//! Integration tests for the safety pipeline.
//!
//! These tests drive `SafetyPipeline` end to end over the in-memory adapters:
//! 1. Policy gate reads settings and fails closed
//! 2. Pattern scan gates the classifier
//! 3. Severity and moderation decisions are made
//! 4. The dispatcher persists, alerts and acts with isolated failures

use std::sync::Arc;
use std::time::Duration;

use companion_safety::adapters::{
    InMemoryCrisisEventRepository, InMemoryModActionRepository, InMemoryPolicyReader,
    NotifierCall, RecordingNotifier, StaticClassifier,
};
use companion_safety::application::{
    DispatchSettings, EscalationError, PipelinePorts, PipelineSettings, SafetyPipeline, SkipReason,
};
use companion_safety::domain::decision::ModerationTrigger;
use companion_safety::domain::detection::CrisisSeverity;
use companion_safety::domain::escalation::ModerationAction;
use companion_safety::domain::foundation::{
    ErrorCode, GuildId, InboundMessage, MessageId, Timestamp, UserId,
};
use companion_safety::domain::policy::{
    AutoModLevel, GuildSafetySettings, PolicyReason, Sensitivity,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    classifier: Arc<StaticClassifier>,
    policy: Arc<InMemoryPolicyReader>,
    crisis_events: Arc<InMemoryCrisisEventRepository>,
    mod_actions: Arc<InMemoryModActionRepository>,
    notifier: Arc<RecordingNotifier>,
    pipeline: SafetyPipeline,
}

impl Harness {
    fn new(classifier: StaticClassifier) -> Self {
        let classifier = Arc::new(classifier);
        let policy = Arc::new(InMemoryPolicyReader::new());
        let crisis_events = Arc::new(InMemoryCrisisEventRepository::new());
        let mod_actions = Arc::new(InMemoryModActionRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let ports = PipelinePorts {
            classifier: Some(classifier.clone()),
            policy_reader: policy.clone(),
            crisis_events: crisis_events.clone(),
            mod_actions: mod_actions.clone(),
            alerter: notifier.clone(),
            messenger: notifier.clone(),
            platform: notifier.clone(),
        };
        let settings = PipelineSettings {
            classifier_timeout: Duration::from_millis(200),
            policy_timeout: Duration::from_millis(200),
            dispatch: DispatchSettings {
                persistence_timeout: Duration::from_millis(200),
                downstream_timeout: Duration::from_millis(200),
                ..DispatchSettings::default()
            },
            ..PipelineSettings::default()
        };

        Self {
            classifier,
            policy,
            crisis_events,
            mod_actions,
            notifier,
            pipeline: SafetyPipeline::new(ports, settings),
        }
    }

    async fn configure_guild(&self, settings: GuildSafetySettings) {
        self.policy.put_guild(guild(), settings).await;
    }
}

fn user() -> UserId {
    UserId::new("user-42").unwrap()
}

fn guild() -> GuildId {
    GuildId::new("guild-7").unwrap()
}

fn in_guild(text: &str, at: Timestamp) -> InboundMessage {
    InboundMessage::in_guild(user(), guild(), text, at)
}

// =============================================================================
// Crisis flow
// =============================================================================

#[tokio::test]
async fn immediate_self_harm_escalates_with_one_event() {
    let h = Harness::new(StaticClassifier::zero());

    let outcome = h
        .pipeline
        .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
        .await
        .unwrap();

    let evaluation = outcome.into_evaluated().expect("evaluated");
    assert_eq!(evaluation.decision.severity, CrisisSeverity::Critical);
    assert!(evaluation.decision.escalate);
    assert!(evaluation.decision.requires_immediate);

    let events = h.crisis_events.all().await;
    assert_eq!(events.len(), 1);
    assert!(events[0].escalated);
    assert_eq!(events[0].severity(), Some(CrisisSeverity::Critical));

    assert_eq!(h.notifier.alerts().len(), 1);
    assert_eq!(h.notifier.support_requests().len(), 1);
}

#[tokio::test]
async fn immediate_violence_threat_escalates_without_classifier() {
    let h = Harness::new(StaticClassifier::failing());

    let evaluation = h
        .pipeline
        .evaluate_crisis(&in_guild("i'm going to shoot up the school tomorrow", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .expect("evaluated");

    assert_eq!(evaluation.decision.severity, CrisisSeverity::Critical);
    assert!(evaluation.assessment.forced_by_pattern);
    assert!(evaluation.decision.escalate);
    assert_eq!(h.crisis_events.len().await, 1);
    assert_eq!(h.notifier.alerts().len(), 1);
}

#[tokio::test]
async fn help_request_with_crisis_keyword_is_evaluated() {
    let h = Harness::new(StaticClassifier::zero());

    let outcome = h
        .pipeline
        .evaluate_crisis(&in_guild("can someone help me, i feel suicidal", Timestamp::now()))
        .await
        .unwrap();

    assert!(outcome.into_evaluated().is_some());
    assert_eq!(h.classifier.call_count(), 1);
}

#[tokio::test]
async fn study_help_request_is_skipped_before_classification() {
    let h = Harness::new(StaticClassifier::zero());

    let outcome = h
        .pipeline
        .evaluate_crisis(&in_guild(
            "can someone help me study for my exam",
            Timestamp::now(),
        ))
        .await
        .unwrap();

    assert_eq!(outcome.skip_reason(), Some(SkipReason::GenericHelpRequest));
    assert!(h.crisis_events.is_empty().await);
    assert_eq!(h.classifier.call_count(), 0);
}

#[tokio::test]
async fn classifier_only_critical_score_does_not_escalate() {
    let h = Harness::new(StaticClassifier::with_scores([("self-harm", 0.97)]));
    h.configure_guild(GuildSafetySettings {
        sensitivity: Sensitivity::High,
        ..Default::default()
    })
    .await;

    let evaluation = h
        .pipeline
        .evaluate_crisis(&in_guild("rough week, not sure about anything", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .expect("evaluated");

    assert_eq!(evaluation.decision.severity, CrisisSeverity::Critical);
    assert!(!evaluation.decision.escalate);
    assert!(h.crisis_events.is_empty().await);
    assert!(h.notifier.calls().is_empty());
}

#[tokio::test]
async fn failing_classifier_matches_zero_scores() {
    let text = "I want to kill myself tonight";

    let failing = Harness::new(StaticClassifier::failing());
    let zero = Harness::new(StaticClassifier::zero());

    let with_failure = failing
        .pipeline
        .evaluate_crisis(&in_guild(text, Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap();
    let with_zero = zero
        .pipeline
        .evaluate_crisis(&in_guild(text, Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap();

    assert_eq!(with_failure.assessment, with_zero.assessment);
    assert_eq!(with_failure.decision, with_zero.decision);
    assert_eq!(failing.crisis_events.len().await, 1);
}

#[tokio::test]
async fn slow_classifier_times_out_to_zero_scores() {
    let h = Harness::new(StaticClassifier::slow(Duration::from_secs(5)));

    let evaluation = h
        .pipeline
        .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap();

    assert!(evaluation.decision.escalate);
    assert_eq!(h.crisis_events.len().await, 1);
}

#[tokio::test]
async fn repeated_escalations_are_all_recorded() {
    let h = Harness::new(StaticClassifier::zero());

    for _ in 0..2 {
        h.pipeline
            .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
            .await
            .unwrap();
    }

    assert_eq!(h.crisis_events.len().await, 2);
    assert_eq!(h.notifier.alerts().len(), 2);
}

#[tokio::test]
async fn direct_message_crisis_sends_support_without_alert() {
    let h = Harness::new(StaticClassifier::zero());
    let message = InboundMessage::direct(user(), "I want to kill myself tonight", Timestamp::now());

    let evaluation = h
        .pipeline
        .evaluate_crisis(&message)
        .await
        .unwrap()
        .into_evaluated()
        .unwrap();

    let dispatch = evaluation.dispatch.expect("dispatched");
    assert!(dispatch.result.logged);
    assert!(!dispatch.result.alert_sent);
    assert!(dispatch.result.response_sent);
    assert!(h.notifier.alerts().is_empty());
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn consecutive_policy_failures_disable_both_flows() {
    let h = Harness::new(StaticClassifier::zero());
    h.policy.set_failing(true);
    h.configure_guild(GuildSafetySettings {
        auto_mod_enabled: true,
        ..Default::default()
    })
    .await;

    for _ in 0..2 {
        let crisis = h
            .pipeline
            .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
            .await
            .unwrap();
        assert_eq!(
            crisis.skip_reason(),
            Some(SkipReason::PolicyDisabled(PolicyReason::PolicyUnavailable))
        );

        let moderation = h
            .pipeline
            .evaluate_moderation(&in_guild("spam spam spam", Timestamp::now()))
            .await
            .unwrap();
        assert_eq!(
            moderation.skip_reason(),
            Some(SkipReason::PolicyDisabled(PolicyReason::PolicyUnavailable))
        );
    }

    assert_eq!(h.classifier.call_count(), 0);
    assert!(h.crisis_events.is_empty().await);
    assert!(h.mod_actions.is_empty().await);
    assert!(h.notifier.calls().is_empty());
    assert_eq!(h.pipeline.tracker().tracked_users(), 0);
}

#[tokio::test]
async fn persistence_failure_surfaces_and_skips_side_effects() {
    let h = Harness::new(StaticClassifier::zero());
    h.crisis_events.set_failing(true);

    let err = h
        .pipeline
        .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
        .await
        .unwrap_err();

    assert!(matches!(err, EscalationError::Persistence(_)));
    assert_eq!(err.code(), ErrorCode::DatabaseError);
    assert!(h.notifier.calls().is_empty());
}

#[tokio::test]
async fn alert_failure_does_not_block_support_message() {
    let h = Harness::new(StaticClassifier::zero());
    h.notifier.set_fail_alerts(true);

    let dispatch = h
        .pipeline
        .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap()
        .dispatch
        .unwrap();

    assert!(dispatch.result.logged);
    assert!(!dispatch.result.alert_sent);
    assert!(dispatch.result.response_sent);
    assert_eq!(h.notifier.support_requests().len(), 1);
}

#[tokio::test]
async fn support_failure_keeps_event_and_alert() {
    let h = Harness::new(StaticClassifier::zero());
    h.notifier.set_fail_support(true);

    let dispatch = h
        .pipeline
        .evaluate_crisis(&in_guild("I want to kill myself tonight", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap()
        .dispatch
        .unwrap();

    assert!(dispatch.result.logged);
    assert!(dispatch.result.alert_sent);
    assert!(!dispatch.result.response_sent);
    assert_eq!(h.crisis_events.len().await, 1);
}

// =============================================================================
// Moderation flow
// =============================================================================

#[tokio::test]
async fn identical_messages_trigger_warning_at_level_three() {
    let h = Harness::new(StaticClassifier::zero());
    h.configure_guild(GuildSafetySettings {
        auto_mod_enabled: true,
        auto_mod_level: AutoModLevel::try_new(3).unwrap(),
        ..Default::default()
    })
    .await;

    let start = Timestamp::now();
    let mut last = None;
    for i in 0..6 {
        let message = in_guild("free nitro at my link", start.plus_secs(i * 4))
            .with_message_id(MessageId::new(format!("msg-{}", i)).unwrap());
        last = h
            .pipeline
            .evaluate_moderation(&message)
            .await
            .unwrap()
            .into_evaluated();
    }

    let evaluation = last.expect("evaluated");
    assert!(evaluation.behavior.is_spamming);
    assert_eq!(evaluation.assessment.content_score, 0.0);
    assert!(evaluation.decision.action >= ModerationAction::Warn);

    let actions = h.mod_actions.all().await;
    assert!(!actions.is_empty());
    assert!(actions.iter().all(|a| a.is_automated()));
    assert!(h
        .notifier
        .platform_calls()
        .iter()
        .any(|call| matches!(call, NotifierCall::Warn { .. })));
}

#[tokio::test]
async fn distinct_flood_warns_at_most_lenient_level() {
    let h = Harness::new(StaticClassifier::zero());
    h.configure_guild(GuildSafetySettings {
        auto_mod_enabled: true,
        auto_mod_level: AutoModLevel::try_new(1).unwrap(),
        ..Default::default()
    })
    .await;

    // Ten distinct messages inside the 30 second span floor: 20 per minute.
    let start = Timestamp::now();
    let mut last = None;
    for i in 0..10 {
        let message = in_guild(&format!("status update number {}", i), start.plus_secs(i * 3))
            .with_message_id(MessageId::new(format!("flood-{}", i)).unwrap());
        last = h
            .pipeline
            .evaluate_moderation(&message)
            .await
            .unwrap()
            .into_evaluated();
    }

    let evaluation = last.expect("evaluated");
    assert!(!evaluation.behavior.is_repetitive);
    assert_eq!(evaluation.behavior.messages_per_minute, 20.0);
    assert_eq!(evaluation.decision.action, ModerationAction::Warn);
    assert_eq!(evaluation.decision.trigger, Some(ModerationTrigger::Frequency));
    assert!(h
        .notifier
        .platform_calls()
        .iter()
        .any(|call| matches!(call, NotifierCall::Warn { .. })));
}

#[tokio::test]
async fn warnings_escalate_to_mute() {
    let h = Harness::new(StaticClassifier::with_scores([("harassment", 0.6)]));
    h.configure_guild(GuildSafetySettings {
        auto_mod_enabled: true,
        auto_mod_level: AutoModLevel::try_new(3).unwrap(),
        ..Default::default()
    })
    .await;

    let start = Timestamp::now();
    let mut actions = Vec::new();
    for i in 0..4 {
        let evaluation = h
            .pipeline
            .evaluate_moderation(&in_guild(&format!("insult number {}", i), start.plus_secs(i * 60)))
            .await
            .unwrap()
            .into_evaluated()
            .unwrap();
        actions.push(evaluation.decision.action);
    }

    assert_eq!(
        actions,
        vec![
            ModerationAction::Warn,
            ModerationAction::Warn,
            ModerationAction::Warn,
            ModerationAction::Mute
        ]
    );
    assert_eq!(h.pipeline.tracker().snapshot(&user()).mutes, 1);
}

#[tokio::test]
async fn platform_failure_is_isolated_from_persistence() {
    let h = Harness::new(StaticClassifier::with_scores([("violence", 0.97)]));
    h.configure_guild(GuildSafetySettings {
        auto_mod_enabled: true,
        ..Default::default()
    })
    .await;
    h.notifier.set_fail_platform(true);

    let dispatch = h
        .pipeline
        .evaluate_moderation(&in_guild("threatening text", Timestamp::now()))
        .await
        .unwrap()
        .into_evaluated()
        .unwrap()
        .dispatch
        .unwrap();

    assert_eq!(dispatch.action.action, ModerationAction::Kick);
    assert!(dispatch.result.logged);
    assert!(dispatch.result.alert_sent);
    assert!(!dispatch.result.response_sent);
    assert_eq!(h.mod_actions.len().await, 1);
}
