//! Redis-backed revocation store
//!
//! Each revoked token is stored as `<prefix><token>` with value `1` and a TTL
//! equal to the token's remaining lifetime.

use async_trait::async_trait;
use tracing::debug;

use ne_core::domain::entities::token::token_fingerprint;
use ne_core::errors::DomainError;
use ne_core::repositories::RevocationStore;
use ne_shared::CacheConfig;

use super::redis_client::RedisClient;

/// Sentinel stored under every revocation key
const REVOKED_MARKER: &str = "1";

/// [`RevocationStore`] over Redis `SETEX`/`EXISTS`
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Build a store using the configured key prefix
    pub fn from_config(client: RedisClient, config: &CacheConfig) -> Self {
        Self::new(client, config.key_prefix.clone())
    }

    /// Cache key for a revoked token
    pub fn key_for(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix, token)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn mark_revoked(&self, token: &str, ttl_seconds: i64) -> Result<(), DomainError> {
        if ttl_seconds <= 0 {
            debug!(token = token_fingerprint(token), "skipping revocation with no lifetime left");
            return Ok(());
        }

        self.client
            .set_with_expiry(&self.key_for(token), REVOKED_MARKER, ttl_seconds as u64)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(token)).await?)
    }
}
