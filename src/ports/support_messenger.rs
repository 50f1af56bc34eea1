//! SupportMessenger port - Supportive direct messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::decision::SupportTier;
use crate::domain::detection::CrisisSeverity;
use crate::domain::foundation::{CrisisEventId, DomainError, UserId};

/// A request to send the user a supportive message of the given tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportRequest {
    pub user_id: UserId,
    pub event_id: CrisisEventId,
    pub tier: SupportTier,
    pub severity: CrisisSeverity,
}

#[async_trait]
pub trait SupportMessenger: Send + Sync {
    async fn send_support(&self, request: &SupportRequest) -> Result<(), DomainError>;
}
