//! Inbound chat message record handed to the pipeline by the host.

use serde::{Deserialize, Serialize};

use super::{GuildId, MessageId, Timestamp, UserId};

/// A single user message as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message id, used when the message has to be deleted.
    pub message_id: Option<MessageId>,
    pub author_id: UserId,
    pub text: String,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub created_at: Timestamp,
}

impl InboundMessage {
    /// Creates a direct message (no guild context).
    pub fn direct(author_id: UserId, text: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            message_id: None,
            author_id,
            text: text.into(),
            guild_id: None,
            created_at,
        }
    }

    /// Creates a message posted in a guild.
    pub fn in_guild(
        author_id: UserId,
        guild_id: GuildId,
        text: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            message_id: None,
            author_id,
            text: text.into(),
            guild_id: Some(guild_id),
            created_at,
        }
    }

    /// Attaches the platform message id.
    pub fn with_message_id(mut self, message_id: MessageId) -> Self {
        self.message_id = Some(message_id);
        self
    }

    /// Returns true when the message was sent outside any guild.
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}
