//! Emoji inventory records.

use serde::{Deserialize, Serialize};

/// One emoji posted by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    pub uid: String,
    /// Emoji code point
    pub emoji: i32,
    /// Seconds since epoch
    pub time: i64,
}

/// Row returned by `emoji.query`; `uid` is only present for the all-users listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    pub emoji: i32,
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl EmojiEntry {
    pub fn for_user(record: EmojiRecord) -> Self {
        Self {
            emoji: record.emoji,
            time: record.time,
            uid: None,
        }
    }

    pub fn with_owner(record: EmojiRecord) -> Self {
        Self {
            emoji: record.emoji,
            time: record.time,
            uid: Some(record.uid),
        }
    }
}
