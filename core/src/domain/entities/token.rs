//! Session token claims.

use serde::{Deserialize, Serialize};

/// Token validity window (7 days, in milliseconds)
pub const TOKEN_VALIDITY_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Claims structure for the signed session token payload
///
/// Timestamps are milliseconds since the Unix epoch. The serialized keys
/// (`uid`, `time`, `exp`) are the ones tokens have always carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User the token is bound to
    pub uid: String,

    /// Issuance time
    #[serde(rename = "time")]
    pub issued_at: i64,

    /// Expiry time, always `issued_at + validity`
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Creates claims issued at `issued_at` with the standard validity window
    pub fn new(uid: impl Into<String>, issued_at: i64) -> Self {
        Self::with_validity(uid, issued_at, TOKEN_VALIDITY_MS)
    }

    /// Creates claims with a caller-supplied validity window
    pub fn with_validity(uid: impl Into<String>, issued_at: i64, validity_ms: i64) -> Self {
        Self {
            uid: uid.into(),
            issued_at,
            expires_at: issued_at.saturating_add(validity_ms),
        }
    }

    /// Expiry is inclusive: a token is dead at exactly `expires_at`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    /// Remaining lifetime in milliseconds (negative once expired)
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.expires_at.saturating_sub(now_ms)
    }

    /// Whether the token predates (or ties with) a credential change
    pub fn is_stale_against(&self, pwd_update_time_ms: i64) -> bool {
        self.issued_at <= pwd_update_time_ms
    }
}

/// Short, log-safe prefix of a raw token string
pub fn token_fingerprint(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(12)
        .map(|(idx, _)| idx)
        .unwrap_or(token.len());
    &token[..end]
}
