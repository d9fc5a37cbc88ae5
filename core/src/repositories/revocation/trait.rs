//! Revocation store trait: a time-bounded set of explicitly revoked tokens.
//!
//! Entries are never deleted by the application; they expire on their own once
//! the token they shadow would have expired anyway. Absence of an entry means
//! "not explicitly revoked", not "valid".

use async_trait::async_trait;

use crate::errors::DomainError;

/// Expiring set of revoked tokens
///
/// Implementations report an unreachable or timed-out backend as
/// [`DomainError::StoreUnavailable`].
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record `token` as revoked for `ttl_seconds`
    ///
    /// # Arguments
    /// * `token` - Raw token string
    /// * `ttl_seconds` - Lifetime of the entry; `<= 0` stores nothing
    async fn mark_revoked(&self, token: &str, ttl_seconds: i64) -> Result<(), DomainError>;

    /// Whether `token` is currently in the set
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;
}
