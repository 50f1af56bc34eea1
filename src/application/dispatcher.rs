//! Escalation dispatcher - executes decided interventions.
//!
//! Side effects run in a fixed order:
//!
//! 1. Persist the record. Failure or timeout aborts with
//!    `EscalationError::Persistence` and nothing else runs.
//! 2. Request a moderator alert. A guild without an alert channel is not an
//!    error.
//! 3. Send the support message (crisis) or execute the platform action
//!    (moderation).
//!
//! A decision that does not require immediate attention swaps steps 2 and
//! 3: the user-facing step runs first and moderators hear about it after.
//! Steps 2 and 3 fail independently and are only logged; nothing rolls
//! back step 1.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::bounded::bounded;
use crate::domain::behavior::BehaviorTracker;
use crate::domain::decision::{CrisisDecision, ModerationDecision, SupportTier};
use crate::domain::escalation::{
    CrisisEvent, CrisisEventDetails, ModAction, ModerationAction, NewCrisisEvent, NewModAction,
};
use crate::domain::foundation::{DomainError, ErrorCode, GuildId, MessageId, Timestamp, UserId};
use crate::domain::policy::PolicyDecision;
use crate::ports::{
    AlertDelivery, AlertSubject, CrisisEventRepository, ModActionRepository, ModeratorAlert,
    ModeratorAlerter, PlatformModerator, SupportMessenger, SupportRequest,
};

/// Prior events looked up for alert context.
const HISTORY_LIMIT: usize = 50;

/// Errors that abort a dispatch.
#[derive(Debug, Clone, Error)]
pub enum EscalationError {
    #[error("Failed to persist escalation record: {0}")]
    Persistence(DomainError),
}

impl EscalationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EscalationError::Persistence(err) => err.code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            EscalationError::Persistence(err) => &err.message,
        }
    }
}

/// Which side effects completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub logged: bool,
    pub alert_sent: bool,
    /// Support message sent (crisis) or platform action executed (moderation).
    pub response_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub persistence_timeout: Duration,
    pub downstream_timeout: Duration,
    pub mute_duration: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            persistence_timeout: Duration::from_secs(5),
            downstream_timeout: Duration::from_secs(5),
            mute_duration: Duration::from_secs(600),
        }
    }
}

/// What a crisis dispatch needs beyond the decision.
#[derive(Debug, Clone)]
pub struct CrisisDispatchContext<'a> {
    pub user_id: &'a UserId,
    pub guild_id: Option<&'a GuildId>,
    pub detected_at: Timestamp,
    pub policy: &'a PolicyDecision,
    pub details: CrisisEventDetails,
}

/// What a moderation dispatch needs beyond the decision.
#[derive(Debug, Clone)]
pub struct ModerationDispatchContext<'a> {
    pub guild_id: &'a GuildId,
    pub user_id: &'a UserId,
    pub message_id: Option<&'a MessageId>,
    pub at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CrisisDispatch {
    pub event: CrisisEvent,
    pub result: DispatchResult,
}

#[derive(Debug, Clone)]
pub struct ModerationDispatch {
    pub action: ModAction,
    pub result: DispatchResult,
}

pub struct EscalationDispatcher {
    crisis_events: Arc<dyn CrisisEventRepository>,
    mod_actions: Arc<dyn ModActionRepository>,
    alerter: Arc<dyn ModeratorAlerter>,
    messenger: Arc<dyn SupportMessenger>,
    platform: Arc<dyn PlatformModerator>,
    tracker: Arc<BehaviorTracker>,
    settings: DispatchSettings,
}

impl EscalationDispatcher {
    pub fn new(
        crisis_events: Arc<dyn CrisisEventRepository>,
        mod_actions: Arc<dyn ModActionRepository>,
        alerter: Arc<dyn ModeratorAlerter>,
        messenger: Arc<dyn SupportMessenger>,
        platform: Arc<dyn PlatformModerator>,
        tracker: Arc<BehaviorTracker>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            crisis_events,
            mod_actions,
            alerter,
            messenger,
            platform,
            tracker,
            settings,
        }
    }

    pub async fn dispatch_crisis(
        &self,
        decision: &CrisisDecision,
        context: CrisisDispatchContext<'_>,
    ) -> Result<CrisisDispatch, EscalationError> {
        let new_event = NewCrisisEvent {
            user_id: context.user_id.clone(),
            guild_id: context.guild_id.cloned(),
            detected_at: context.detected_at,
            escalated: decision.escalate,
            details: context.details,
        };

        let event = bounded(
            self.settings.persistence_timeout,
            "crisis_event_create",
            self.crisis_events.create(new_event),
        )
        .await
        .map_err(|err| {
            error!(user_id = %context.user_id, error = %err, "Failed to persist crisis event");
            EscalationError::Persistence(err)
        })?;

        let mut result = DispatchResult {
            logged: true,
            ..DispatchResult::default()
        };

        let alert = match (context.policy.alerts_allowed, context.guild_id) {
            (true, Some(guild_id)) => Some(ModeratorAlert {
                guild_id: guild_id.clone(),
                user_id: context.user_id.clone(),
                subject: AlertSubject::Crisis {
                    event_id: event.id,
                    severity: decision.severity,
                    support_level: decision.support_level,
                    prior_events: self.prior_crisis_events(&event).await,
                },
                requires_immediate: decision.requires_immediate,
                raised_at: context.detected_at,
            }),
            _ => None,
        };

        if decision.requires_immediate {
            if let Some(alert) = &alert {
                result.alert_sent = self.send_alert(alert).await;
            }
        }

        if context.policy.support_messages_allowed && decision.support_tier != SupportTier::None {
            let request = SupportRequest {
                user_id: context.user_id.clone(),
                event_id: event.id,
                tier: decision.support_tier,
                severity: decision.severity,
            };
            match bounded(
                self.settings.downstream_timeout,
                "support_message",
                self.messenger.send_support(&request),
            )
            .await
            {
                Ok(()) => result.response_sent = true,
                Err(err) => warn!(
                    user_id = %context.user_id,
                    error = %err,
                    "Support message failed"
                ),
            }
        }

        if !decision.requires_immediate {
            if let Some(alert) = &alert {
                result.alert_sent = self.send_alert(alert).await;
            }
        }

        info!(
            user_id = %context.user_id,
            event_id = %event.id,
            severity = %decision.severity,
            alert_sent = result.alert_sent,
            response_sent = result.response_sent,
            "Crisis escalated"
        );

        Ok(CrisisDispatch { event, result })
    }

    pub async fn dispatch_moderation(
        &self,
        decision: &ModerationDecision,
        context: ModerationDispatchContext<'_>,
    ) -> Result<ModerationDispatch, EscalationError> {
        let new_action = NewModAction::automated(
            context.guild_id.clone(),
            context.user_id.clone(),
            decision.action,
            decision.reason.clone(),
            context.at,
        );

        let action = bounded(
            self.settings.persistence_timeout,
            "mod_action_create",
            self.mod_actions.create(new_action),
        )
        .await
        .map_err(|err| {
            error!(
                user_id = %context.user_id,
                guild_id = %context.guild_id,
                error = %err,
                "Failed to persist moderation action"
            );
            EscalationError::Persistence(err)
        })?;

        let mut result = DispatchResult {
            logged: true,
            ..DispatchResult::default()
        };

        let alert = ModeratorAlert {
            guild_id: context.guild_id.clone(),
            user_id: context.user_id.clone(),
            subject: AlertSubject::Moderation {
                action_id: action.id,
                action: decision.action,
                reason: decision.reason.clone(),
            },
            requires_immediate: decision.requires_immediate,
            raised_at: context.at,
        };
        if decision.requires_immediate {
            result.alert_sent = self.send_alert(&alert).await;
        }

        if let Some(message_id) = context.message_id {
            if let Err(err) = bounded(
                self.settings.downstream_timeout,
                "delete_message",
                self.platform.delete_message(context.guild_id, message_id),
            )
            .await
            {
                warn!(
                    guild_id = %context.guild_id,
                    message_id = %message_id,
                    error = %err,
                    "Message deletion failed"
                );
            }
        }

        match self.execute(decision, &context).await {
            Ok(()) => {
                result.response_sent = true;
                self.tracker
                    .record_action(context.user_id, decision.action, context.at);
            }
            Err(err) => warn!(
                user_id = %context.user_id,
                guild_id = %context.guild_id,
                action = %decision.action,
                error = %err,
                "Moderation action failed"
            ),
        }

        if !decision.requires_immediate {
            result.alert_sent = self.send_alert(&alert).await;
        }

        info!(
            user_id = %context.user_id,
            guild_id = %context.guild_id,
            action = %decision.action,
            reason = %decision.reason,
            executed = result.response_sent,
            "Moderation action taken"
        );

        Ok(ModerationDispatch { action, result })
    }

    async fn execute(
        &self,
        decision: &ModerationDecision,
        context: &ModerationDispatchContext<'_>,
    ) -> Result<(), DomainError> {
        let guild = context.guild_id;
        let user = context.user_id;
        let reason = decision.reason.as_str();
        let limit = self.settings.downstream_timeout;

        match decision.action {
            ModerationAction::None => Ok(()),
            ModerationAction::Warn => {
                bounded(limit, "warn", self.platform.warn(guild, user, reason)).await
            }
            ModerationAction::Mute => {
                bounded(
                    limit,
                    "mute",
                    self.platform
                        .mute(guild, user, self.settings.mute_duration, reason),
                )
                .await
            }
            ModerationAction::Kick => {
                bounded(limit, "kick", self.platform.kick(guild, user, reason)).await
            }
            ModerationAction::Ban => {
                bounded(limit, "ban", self.platform.ban(guild, user, reason)).await
            }
        }
    }

    /// Crisis events on record for the user before `event`.
    async fn prior_crisis_events(&self, event: &CrisisEvent) -> usize {
        match bounded(
            self.settings.downstream_timeout,
            "crisis_event_history",
            self.crisis_events
                .find_recent_by_user(&event.user_id, HISTORY_LIMIT + 1),
        )
        .await
        {
            Ok(events) => events.iter().filter(|e| e.id != event.id).count(),
            Err(err) => {
                warn!(user_id = %event.user_id, error = %err, "Crisis history unavailable");
                0
            }
        }
    }

    async fn send_alert(&self, alert: &ModeratorAlert) -> bool {
        match bounded(
            self.settings.downstream_timeout,
            "moderator_alert",
            self.alerter.alert(alert),
        )
        .await
        {
            Ok(AlertDelivery::Delivered) => true,
            Ok(AlertDelivery::NoChannelConfigured) => {
                debug!(guild_id = %alert.guild_id, "No alert channel configured");
                false
            }
            Err(err) => {
                warn!(guild_id = %alert.guild_id, error = %err, "Moderator alert failed");
                false
            }
        }
    }
}
