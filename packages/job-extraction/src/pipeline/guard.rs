//! Bounded, classified wrapper around every external call.

use std::future::Future;
use std::time::Duration;

use crate::error::{CallOutcome, ProviderError, ProviderFailure, ProviderResult, FailureKind};

/// Await a collaborator call with a time budget.
///
/// Provider errors are classified under `kind`; running past `timeout` yields
/// a [`FailureKind::Timeout`] failure. Nothing here panics or propagates.
pub async fn guarded<T, F>(kind: FailureKind, timeout: Duration, call: F) -> CallOutcome<T>
where
    F: Future<Output = ProviderResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ProviderFailure::from_error(kind, &e)),
        Err(_) => Err(ProviderFailure::from_error(
            kind,
            &ProviderError::Timeout(timeout),
        )),
    }
}
