use std::future::Future;
use std::time::Duration;

use crate::error::DbError;

/// Run `fut`, failing with [`DbError::Timeout`] if it does not finish within `limit`.
///
/// # Errors
/// Propagates the inner error, or `Timeout` on expiry.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, DbError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(?limit, "store call timed out");
            Err(DbError::Timeout(limit))
        }
    }
}
