//! Timeout wrapper for collaborator calls.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::DomainError;

/// Runs `call` with an upper bound; elapsing yields `DomainError::timeout`.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| DomainError::timeout(operation))?
}
