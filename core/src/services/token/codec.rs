//! Signed session token codec
//!
//! The codec only answers "was this signed by us, and what does it say".
//! Expiry, revocation and credential-change checks live in the session
//! authority.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{token_fingerprint, Claims};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::TokenCodecConfig;
use super::key_manager::EdDsaKeyManager;

/// Encodes and decodes EdDSA-signed session tokens
pub struct TokenCodec {
    keys: EdDsaKeyManager,
    config: TokenCodecConfig,
    clock: Arc<dyn Clock>,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec signing with `keys` and stamping tokens from `clock`
    pub fn new(keys: EdDsaKeyManager, config: TokenCodecConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::EdDSA);
        // exp is in milliseconds and judged by the authority
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys,
            config,
            clock,
            header: Header::new(Algorithm::EdDSA),
            validation,
        }
    }

    /// Issues a token for `uid`, valid from now for the configured window
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact serialized token
    /// * `Err(DomainError::Internal)` - Signing failed
    pub fn encode(&self, uid: &str) -> Result<String, DomainError> {
        let claims = Claims::with_validity(uid, self.clock.now_ms(), self.config.token_validity_ms);
        self.encode_claims(&claims)
    }

    /// Signs claims the caller already built
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&self.header, claims, self.keys.encoding_key()).map_err(|e| DomainError::Internal {
            message: format!("Failed to sign token: {}", e),
        })
    }

    /// Verifies the signature and algorithm and returns the embedded claims
    ///
    /// Any structural, signature or algorithm problem is reported as
    /// [`TokenError::MalformedToken`].
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(token = token_fingerprint(token), error = %e, "token failed verification");
                TokenError::MalformedToken
            })
    }

    /// Configured validity window in milliseconds
    pub fn validity_ms(&self) -> i64 {
        self.config.token_validity_ms
    }
}
