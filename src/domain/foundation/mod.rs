//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the inbound message record and error
//! types that form the vocabulary of the safety domain.

mod errors;
mod ids;
mod message;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CrisisEventId, GuildId, MessageId, ModActionId, UserId};
pub use message::InboundMessage;
pub use timestamp::Timestamp;
