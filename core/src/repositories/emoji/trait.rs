//! Emoji repository trait.

use async_trait::async_trait;

use crate::domain::entities::emoji::EmojiRecord;
use crate::errors::DomainError;

/// Repository trait for emoji inventory rows
#[async_trait]
pub trait EmojiRepository: Send + Sync {
    /// Append one record
    async fn insert(&self, record: EmojiRecord) -> Result<(), DomainError>;

    /// Records owned by `uid`, oldest first
    async fn list_by_uid(&self, uid: &str) -> Result<Vec<EmojiRecord>, DomainError>;

    /// Every record, oldest first
    async fn list_all(&self) -> Result<Vec<EmojiRecord>, DomainError>;
}
