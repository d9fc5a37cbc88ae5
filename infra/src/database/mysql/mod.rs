//! MySQL implementations of the core repository traits

pub mod emoji_repository_impl;
pub mod user_repository_impl;

pub use emoji_repository_impl::MySqlEmojiRepository;
pub use user_repository_impl::MySqlUserRepository;

use chrono::{DateTime, TimeZone, Utc};
use ne_core::errors::DomainError;

/// Milliseconds since epoch to a `DATETIME(3)` value
pub(crate) fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>, DomainError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| DomainError::Internal {
            message: format!("timestamp out of range: {}", ms),
        })
}

/// Map a row decoding failure onto the domain
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
