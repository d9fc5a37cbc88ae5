//! MySQL implementation of the EmojiRepository trait.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use ne_core::domain::entities::emoji::EmojiRecord;
use ne_core::errors::DomainError;
use ne_core::repositories::EmojiRepository;

use super::column_error;
use crate::bounded;
use crate::database::DatabasePool;

/// MySQL implementation of EmojiRepository over the `emojis` table
pub struct MySqlEmojiRepository {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlEmojiRepository {
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone(), pool.query_timeout())
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<EmojiRecord, DomainError> {
        Ok(EmojiRecord {
            uid: row.try_get("uid").map_err(|e| column_error("uid", e))?,
            emoji: row.try_get("emoji").map_err(|e| column_error("emoji", e))?,
            time: row.try_get("time").map_err(|e| column_error("time", e))?,
        })
    }
}

#[async_trait]
impl EmojiRepository for MySqlEmojiRepository {
    async fn insert(&self, record: EmojiRecord) -> Result<(), DomainError> {
        bounded(
            "emojis.insert",
            self.query_timeout,
            sqlx::query("INSERT INTO emojis (uid, emoji, time) VALUES (?, ?, ?)")
                .bind(&record.uid)
                .bind(record.emoji)
                .bind(record.time)
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn list_by_uid(&self, uid: &str) -> Result<Vec<EmojiRecord>, DomainError> {
        let rows = bounded(
            "emojis.list_by_uid",
            self.query_timeout,
            sqlx::query("SELECT uid, emoji, time FROM emojis WHERE uid = ? ORDER BY time, id")
                .bind(uid)
                .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn list_all(&self) -> Result<Vec<EmojiRecord>, DomainError> {
        let rows = bounded(
            "emojis.list_all",
            self.query_timeout,
            sqlx::query("SELECT uid, emoji, time FROM emojis ORDER BY time, id")
                .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
