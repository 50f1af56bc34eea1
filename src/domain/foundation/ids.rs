//! Strongly-typed identifier value objects.
//!
//! Platform identifiers (users, guilds, messages) are opaque strings owned by
//! the chat platform. Records created by this crate use UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! platform_id {
    ($(#[$doc:meta])* $name:ident, $field:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

platform_id!(
    /// Platform identifier of a chat user.
    UserId,
    "user_id"
);

platform_id!(
    /// Platform identifier of a guild (server). Direct messages have none.
    GuildId,
    "guild_id"
);

platform_id!(
    /// Platform identifier of a single chat message.
    MessageId,
    "message_id"
);

impl UserId {
    /// The actor recorded as moderator for automated actions.
    pub fn system() -> Self {
        Self("system".to_string())
    }
}

/// Unique identifier for a persisted crisis event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrisisEventId(Uuid);

impl CrisisEventId {
    /// Creates a new random CrisisEventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CrisisEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CrisisEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CrisisEventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a persisted moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModActionId(Uuid);

impl ModActionId {
    /// Creates a new random ModActionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ModActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModActionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_displays_inner_value() {
        let id = UserId::new("123456789").unwrap();
        assert_eq!(id.to_string(), "123456789");
        assert_eq!(id.as_str(), "123456789");
    }

    #[test]
    fn guild_id_empty_error_names_field() {
        let err = GuildId::new("").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("guild_id"));
    }

    #[test]
    fn system_actor_is_stable() {
        assert_eq!(UserId::system(), UserId::system());
        assert_eq!(UserId::system().as_str(), "system");
    }

    #[test]
    fn crisis_event_ids_are_unique() {
        assert_ne!(CrisisEventId::new(), CrisisEventId::new());
    }

    #[test]
    fn mod_action_id_parses_from_string() {
        let id = ModActionId::new();
        let parsed: ModActionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
