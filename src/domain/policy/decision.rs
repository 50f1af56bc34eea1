//! Policy evaluation.
//!
//! Pure functions over already-read settings. Missing settings fall back to
//! defaults; read failures are handled by the caller, which falls back to
//! the disabled decisions built here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AutoModLevel, GuildSafetySettings, Sensitivity, UserSafetySettings};

/// Why a policy decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyReason {
    Allowed,
    UserOptedOut,
    PrivacyMode,
    DirectMessage,
    AutoModDisabled,
    PolicyUnavailable,
}

impl PolicyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyReason::Allowed => "allowed",
            PolicyReason::UserOptedOut => "user_opted_out",
            PolicyReason::PrivacyMode => "privacy_mode",
            PolicyReason::DirectMessage => "direct_message",
            PolicyReason::AutoModDisabled => "auto_mod_disabled",
            PolicyReason::PolicyUnavailable => "policy_unavailable",
        }
    }
}

impl fmt::Display for PolicyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Crisis-flow policy for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub enabled: bool,
    pub sensitivity: Sensitivity,
    pub reason: PolicyReason,
    pub classifier_allowed: bool,
    pub alerts_allowed: bool,
    pub support_messages_allowed: bool,
}

impl PolicyDecision {
    pub fn disabled(reason: PolicyReason) -> Self {
        Self {
            enabled: false,
            sensitivity: Sensitivity::default(),
            reason,
            classifier_allowed: false,
            alerts_allowed: false,
            support_messages_allowed: false,
        }
    }
}

/// Moderation-flow policy for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationPolicy {
    pub enabled: bool,
    pub level: AutoModLevel,
    pub classifier_allowed: bool,
    pub reason: PolicyReason,
}

impl ModerationPolicy {
    pub fn disabled(reason: PolicyReason) -> Self {
        Self {
            enabled: false,
            level: AutoModLevel::default(),
            classifier_allowed: false,
            reason,
        }
    }
}

/// Evaluates the crisis policy.
///
/// `guild` is `None` for direct messages; `Some(None)` is a guild with no
/// stored settings.
pub fn evaluate_crisis_policy(
    user: Option<&UserSafetySettings>,
    guild: Option<Option<&GuildSafetySettings>>,
) -> PolicyDecision {
    let user = user.cloned().unwrap_or_default();

    if user.privacy_mode {
        return PolicyDecision::disabled(PolicyReason::PrivacyMode);
    }
    if user.opt_out_crisis {
        return PolicyDecision::disabled(PolicyReason::UserOptedOut);
    }

    let user_classifier = !user.opt_out_ai;
    let support_messages_allowed = !user.opt_out_support_dms;

    match guild {
        None => PolicyDecision {
            enabled: true,
            sensitivity: Sensitivity::default(),
            reason: PolicyReason::Allowed,
            classifier_allowed: user_classifier,
            alerts_allowed: false,
            support_messages_allowed,
        },
        Some(settings) => {
            let guild = settings.cloned().unwrap_or_default();
            PolicyDecision {
                enabled: true,
                sensitivity: guild.sensitivity,
                reason: PolicyReason::Allowed,
                classifier_allowed: user_classifier && guild.ai_enabled,
                alerts_allowed: guild.crisis_alerts_enabled,
                support_messages_allowed,
            }
        }
    }
}

/// Evaluates the moderation policy. Direct messages are never moderated.
pub fn evaluate_moderation_policy(guild: Option<Option<&GuildSafetySettings>>) -> ModerationPolicy {
    let settings = match guild {
        None => return ModerationPolicy::disabled(PolicyReason::DirectMessage),
        Some(settings) => settings.cloned().unwrap_or_default(),
    };

    if !settings.auto_mod_enabled {
        return ModerationPolicy::disabled(PolicyReason::AutoModDisabled);
    }

    ModerationPolicy {
        enabled: true,
        level: settings.auto_mod_level,
        classifier_allowed: settings.ai_enabled,
        reason: PolicyReason::Allowed,
    }
}
