//! Recording notifier - captures outbound requests instead of sending them.
//!
//! Implements `ModeratorAlerter`, `SupportMessenger` and `PlatformModerator`
//! over one ordered call log, so tests can assert on the order of side
//! effects across ports.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, GuildId, MessageId, UserId};
use crate::ports::{
    AlertDelivery, ModeratorAlert, ModeratorAlerter, PlatformModerator, SupportMessenger,
    SupportRequest,
};

/// One captured outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifierCall {
    Alert(ModeratorAlert),
    Support(SupportRequest),
    DeleteMessage { guild_id: GuildId, message_id: MessageId },
    Warn { guild_id: GuildId, user_id: UserId, reason: String },
    Mute { guild_id: GuildId, user_id: UserId, duration: Duration, reason: String },
    Kick { guild_id: GuildId, user_id: UserId, reason: String },
    Ban { guild_id: GuildId, user_id: UserId, reason: String },
}

#[derive(Debug)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<NotifierCall>>,
    channel_configured: AtomicBool,
    fail_alerts: AtomicBool,
    fail_support: AtomicBool,
    fail_platform: AtomicBool,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            channel_configured: AtomicBool::new(true),
            fail_alerts: AtomicBool::new(false),
            fail_support: AtomicBool::new(false),
            fail_platform: AtomicBool::new(false),
        }
    }
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without a channel, alerts report `NoChannelConfigured`.
    pub fn set_channel_configured(&self, configured: bool) {
        self.channel_configured.store(configured, Ordering::SeqCst);
    }

    pub fn set_fail_alerts(&self, fail: bool) {
        self.fail_alerts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_support(&self, fail: bool) {
        self.fail_support.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_platform(&self, fail: bool) {
        self.fail_platform.store(fail, Ordering::SeqCst);
    }

    /// All captured calls in order.
    pub fn calls(&self) -> Vec<NotifierCall> {
        self.lock().clone()
    }

    pub fn alerts(&self) -> Vec<ModeratorAlert> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                NotifierCall::Alert(alert) => Some(alert.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn support_requests(&self) -> Vec<SupportRequest> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                NotifierCall::Support(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Platform actions only, in order.
    pub fn platform_calls(&self) -> Vec<NotifierCall> {
        self.lock()
            .iter()
            .filter(|call| !matches!(call, NotifierCall::Alert(_) | NotifierCall::Support(_)))
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NotifierCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, call: NotifierCall) {
        self.lock().push(call);
    }

    fn fail_if(flag: &AtomicBool, code: ErrorCode, what: &str) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::new(code, format!("{} failed", what)));
        }
        Ok(())
    }

    fn platform(&self, call: NotifierCall, what: &str) -> Result<(), DomainError> {
        Self::fail_if(&self.fail_platform, ErrorCode::PlatformActionFailed, what)?;
        self.push(call);
        Ok(())
    }
}

#[async_trait]
impl ModeratorAlerter for RecordingNotifier {
    async fn alert(&self, alert: &ModeratorAlert) -> Result<AlertDelivery, DomainError> {
        Self::fail_if(&self.fail_alerts, ErrorCode::NotificationFailed, "Moderator alert")?;
        if !self.channel_configured.load(Ordering::SeqCst) {
            return Ok(AlertDelivery::NoChannelConfigured);
        }
        self.push(NotifierCall::Alert(alert.clone()));
        Ok(AlertDelivery::Delivered)
    }
}

#[async_trait]
impl SupportMessenger for RecordingNotifier {
    async fn send_support(&self, request: &SupportRequest) -> Result<(), DomainError> {
        Self::fail_if(&self.fail_support, ErrorCode::NotificationFailed, "Support message")?;
        self.push(NotifierCall::Support(request.clone()));
        Ok(())
    }
}

#[async_trait]
impl PlatformModerator for RecordingNotifier {
    async fn delete_message(&self, guild_id: &GuildId, message_id: &MessageId) -> Result<(), DomainError> {
        self.platform(
            NotifierCall::DeleteMessage {
                guild_id: guild_id.clone(),
                message_id: message_id.clone(),
            },
            "Delete message",
        )
    }

    async fn warn(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError> {
        self.platform(
            NotifierCall::Warn {
                guild_id: guild_id.clone(),
                user_id: user_id.clone(),
                reason: reason.to_string(),
            },
            "Warn",
        )
    }

    async fn mute(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), DomainError> {
        self.platform(
            NotifierCall::Mute {
                guild_id: guild_id.clone(),
                user_id: user_id.clone(),
                duration,
                reason: reason.to_string(),
            },
            "Mute",
        )
    }

    async fn kick(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError> {
        self.platform(
            NotifierCall::Kick {
                guild_id: guild_id.clone(),
                user_id: user_id.clone(),
                reason: reason.to_string(),
            },
            "Kick",
        )
    }

    async fn ban(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> Result<(), DomainError> {
        self.platform(
            NotifierCall::Ban {
                guild_id: guild_id.clone(),
                user_id: user_id.clone(),
                reason: reason.to_string(),
            },
            "Ban",
        )
    }
}
