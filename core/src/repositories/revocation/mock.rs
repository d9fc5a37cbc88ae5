//! Mock implementation of RevocationStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::RevocationStore;

/// In-memory revocation set that remembers the TTL each entry was stored with
///
/// Entries never expire on their own; tests assert on the recorded TTL instead.
#[derive(Clone, Default)]
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, i64>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// TTL in seconds the token was stored with, if any
    pub async fn ttl_of(&self, token: &str) -> Option<i64> {
        self.entries.read().await.get(token).copied()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock revocation cache offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn mark_revoked(&self, token: &str, ttl_seconds: i64) -> Result<(), DomainError> {
        self.check_available()?;
        if ttl_seconds <= 0 {
            return Ok(());
        }
        self.entries
            .write()
            .await
            .insert(token.to_string(), ttl_seconds);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.entries.read().await.contains_key(token))
    }
}
