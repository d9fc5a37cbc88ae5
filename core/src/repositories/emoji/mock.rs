//! Mock implementation of EmojiRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::emoji::EmojiRecord;
use crate::errors::DomainError;

use super::trait_::EmojiRepository;

/// Mock emoji repository keeping rows in insertion order
#[derive(Clone, Default)]
pub struct MockEmojiRepository {
    records: Arc<RwLock<Vec<EmojiRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockEmojiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock emoji store offline"));
        }
        Ok(())
    }

    fn sorted(mut records: Vec<EmojiRecord>) -> Vec<EmojiRecord> {
        // stable: equal timestamps keep insertion order, like an auto-increment tiebreak
        records.sort_by_key(|r| r.time);
        records
    }
}

#[async_trait]
impl EmojiRepository for MockEmojiRepository {
    async fn insert(&self, record: EmojiRecord) -> Result<(), DomainError> {
        self.check_available()?;
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list_by_uid(&self, uid: &str) -> Result<Vec<EmojiRecord>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        let owned = records.iter().filter(|r| r.uid == uid).cloned().collect();
        Ok(Self::sorted(owned))
    }

    async fn list_all(&self) -> Result<Vec<EmojiRecord>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(Self::sorted(records.clone()))
    }
}
