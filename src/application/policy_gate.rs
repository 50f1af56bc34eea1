//! Policy gate - decides if and how the flows run for a message.
//!
//! Any read failure or timeout disables the flow. Nothing is written and no
//! collaborator other than the policy reader is touched on that path.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::bounded::bounded;
use crate::domain::foundation::{DomainError, GuildId, UserId};
use crate::domain::policy::{
    evaluate_crisis_policy, evaluate_moderation_policy, ModerationPolicy, PolicyDecision,
    PolicyReason,
};
use crate::ports::PolicyReader;

pub struct PolicyGate {
    reader: Arc<dyn PolicyReader>,
    timeout: Duration,
}

impl PolicyGate {
    pub fn new(reader: Arc<dyn PolicyReader>, timeout: Duration) -> Self {
        Self { reader, timeout }
    }

    /// Crisis policy for a message. `guild_id` is `None` for direct messages.
    pub async fn authorize(&self, user_id: &UserId, guild_id: Option<&GuildId>) -> PolicyDecision {
        match self.read_crisis(user_id, guild_id).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(
                    user_id = %user_id,
                    guild_id = ?guild_id.map(GuildId::as_str),
                    error = %err,
                    "Policy read failed, crisis checks disabled"
                );
                PolicyDecision::disabled(PolicyReason::PolicyUnavailable)
            }
        }
    }

    /// Auto-moderation policy for a message. Direct messages are never read.
    pub async fn authorize_moderation(&self, guild_id: Option<&GuildId>) -> ModerationPolicy {
        let Some(guild_id) = guild_id else {
            return evaluate_moderation_policy(None);
        };

        match bounded(self.timeout, "policy_read", self.reader.guild_settings(guild_id)).await {
            Ok(settings) => evaluate_moderation_policy(Some(settings.as_ref())),
            Err(err) => {
                warn!(
                    guild_id = %guild_id,
                    error = %err,
                    "Policy read failed, auto-moderation disabled"
                );
                ModerationPolicy::disabled(PolicyReason::PolicyUnavailable)
            }
        }
    }

    async fn read_crisis(
        &self,
        user_id: &UserId,
        guild_id: Option<&GuildId>,
    ) -> Result<PolicyDecision, DomainError> {
        let user = bounded(self.timeout, "policy_read", self.reader.user_settings(user_id)).await?;
        let guild = match guild_id {
            Some(guild_id) => Some(
                bounded(self.timeout, "policy_read", self.reader.guild_settings(guild_id)).await?,
            ),
            None => None,
        };

        Ok(evaluate_crisis_policy(
            user.as_ref(),
            guild.as_ref().map(Option::as_ref),
        ))
    }
}
