//! Configuration for the token codec

use ne_shared::JwtConfig;

use crate::domain::entities::token::TOKEN_VALIDITY_MS;

/// Configuration for the token codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCodecConfig {
    /// Lifetime of an issued token in milliseconds
    pub token_validity_ms: i64,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            token_validity_ms: TOKEN_VALIDITY_MS,
        }
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            token_validity_ms: config.token_validity_ms,
        }
    }
}
