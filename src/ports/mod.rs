//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the safety domain and the outside world. Adapters implement these ports.
//!
//! ## Inbound Ports
//!
//! - `ContentClassifier` - External per-category content scoring
//! - `PolicyReader` - Per-user and per-guild safety settings
//!
//! ## Record Ports
//!
//! - `CrisisEventRepository` - Persisted crisis escalations
//! - `ModActionRepository` - Append-only moderation history
//!
//! ## Outbound Request Ports
//!
//! - `ModeratorAlerter` - Alerts to a guild's moderators
//! - `SupportMessenger` - Supportive direct messages to the user
//! - `PlatformModerator` - Platform moderation actions

mod content_classifier;
mod crisis_event_repository;
mod mod_action_repository;
mod moderator_alerter;
mod platform_moderator;
mod policy_reader;
mod support_messenger;

pub use content_classifier::{ClassifierResponse, ContentClassifier};
pub use crisis_event_repository::CrisisEventRepository;
pub use mod_action_repository::ModActionRepository;
pub use moderator_alerter::{AlertDelivery, AlertSubject, ModeratorAlert, ModeratorAlerter};
pub use platform_moderator::PlatformModerator;
pub use policy_reader::PolicyReader;
pub use support_messenger::{SupportMessenger, SupportRequest};
