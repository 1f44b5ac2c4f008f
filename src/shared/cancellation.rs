//! Cancellation for source round-trips

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::domain::{PagingError, PagingResult};

/// Run `operation` unless `token` fires first.
///
/// A token that is already cancelled wins even over a ready operation, so a
/// cancelled call never yields a result.
pub async fn cancellable<F, T>(token: Option<&CancellationToken>, operation: F) -> PagingResult<T>
where
    F: Future<Output = PagingResult<T>>,
{
    let Some(token) = token else {
        return operation.await;
    };

    tokio::select! {
        biased;
        _ = token.cancelled() => {
            trace!("Source operation cancelled");
            Err(PagingError::Cancelled)
        }
        result = operation => result,
    }
}
