//! Session token configuration

use serde::{Deserialize, Serialize};

/// Seven days, in milliseconds.
pub const DEFAULT_TOKEN_VALIDITY_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// The only signature algorithm the token codec accepts.
pub const TOKEN_ALGORITHM: &str = "EdDSA";

/// Signing key and validity settings for session tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Path to the PKCS#8 PEM Ed25519 private key used for signing
    pub private_key_path: String,

    /// Path to the SPKI PEM Ed25519 public key used for verification
    pub public_key_path: String,

    /// Signature algorithm identifier (must be "EdDSA")
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Lifetime of an issued token in milliseconds
    #[serde(default = "default_token_validity_ms")]
    pub token_validity_ms: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/jwt_private.pem"),
            public_key_path: String::from("keys/jwt_public.pem"),
            algorithm: default_algorithm(),
            token_validity_ms: default_token_validity_ms(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration pointing at the given key files
    pub fn new(private_key_path: impl Into<String>, public_key_path: impl Into<String>) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            ..Default::default()
        }
    }

    /// Whether the configured algorithm is the one the codec supports
    pub fn is_supported_algorithm(&self) -> bool {
        self.algorithm == TOKEN_ALGORITHM
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing configuration
    #[serde(default)]
    pub jwt: JwtConfig,
}

fn default_algorithm() -> String {
    String::from(TOKEN_ALGORITHM)
}

fn default_token_validity_ms() -> i64 {
    DEFAULT_TOKEN_VALIDITY_MS
}
