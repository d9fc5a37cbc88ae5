//! # Infrastructure Layer
//!
//! Concrete storage behind the `ne_core` repository traits:
//! - **Database**: MySQL credential store and emoji inventory using SQLx
//! - **Cache**: Redis client and the Redis-backed revocation store
//!
//! Every storage call is bounded by a configured timeout. Timeouts and driver
//! failures reach the domain as [`DomainError::StoreUnavailable`].

use std::future::Future;
use std::time::Duration;

use ne_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and revocation store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage call exceeded its time budget
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout { operation: &'static str, after_ms: u128 },
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::store_unavailable(other.to_string()),
        }
    }
}

/// Run a storage call, failing with [`InfrastructureError::Timeout`] once `limit` elapses
pub(crate) async fn bounded<T, E, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, InfrastructureError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<InfrastructureError>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(operation, after_ms = limit.as_millis() as u64, "storage call timed out");
            Err(InfrastructureError::Timeout {
                operation,
                after_ms: limit.as_millis(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_store_unavailable() {
        let err: DomainError = InfrastructureError::Timeout {
            operation: "users.find_by_uid",
            after_ms: 250,
        }
        .into();
        assert!(err.is_store_unavailable());
        assert!(err.to_string().contains("users.find_by_uid timed out after 250ms"));
    }

    #[test]
    fn test_config_error_is_internal() {
        let err: DomainError = InfrastructureError::Config("bad url".to_string()).into();
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, InfrastructureError>(())
        };
        let result = bounded("slow", Duration::from_millis(10), slow).await;
        assert!(matches!(result, Err(InfrastructureError::Timeout { operation: "slow", .. })));
    }

    #[tokio::test]
    async fn test_bounded_passes_through() {
        let fast = async { Ok::<_, InfrastructureError>(7) };
        assert_eq!(bounded("fast", Duration::from_secs(1), fast).await.unwrap(), 7);
    }
}
