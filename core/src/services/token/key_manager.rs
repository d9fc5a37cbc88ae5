//! Ed25519 key management for token signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};
use ne_shared::JwtConfig;

use crate::errors::DomainError;

/// Holds the Ed25519 key pair used by the token codec
#[derive(Clone)]
pub struct EdDsaKeyManager {
    /// Private key for signing
    encoding_key: EncodingKey,
    /// Public key for verification
    decoding_key: DecodingKey,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl std::fmt::Debug for EdDsaKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdDsaKeyManager")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl EdDsaKeyManager {
    /// Loads the key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - PKCS#8 PEM Ed25519 private key
    /// * `public_key_path` - SPKI PEM Ed25519 public key
    ///
    /// # Returns
    ///
    /// * `Ok(EdDsaKeyManager)` - Both keys loaded
    /// * `Err(DomainError::KeyLoad)` - A file is missing or not an Ed25519 PEM
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ne_core::services::token::EdDsaKeyManager;
    ///
    /// let keys = EdDsaKeyManager::new("keys/jwt_private.pem", "keys/jwt_public.pem")?;
    /// # Ok::<(), ne_core::errors::DomainError>(())
    /// ```
    pub fn new<P: AsRef<Path>>(private_key_path: P, public_key_path: P) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read(&private_key_path).map_err(|e| DomainError::KeyLoad {
            message: format!(
                "Failed to read private key {}: {}",
                private_key_path.display(),
                e
            ),
        })?;
        let public_key_pem = fs::read(&public_key_path).map_err(|e| DomainError::KeyLoad {
            message: format!(
                "Failed to read public key {}: {}",
                public_key_path.display(),
                e
            ),
        })?;

        let (encoding_key, decoding_key) = Self::parse(&private_key_pem, &public_key_pem)?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_path,
            public_key_path,
        })
    }

    /// Loads the key files named in the auth configuration
    pub fn from_config(config: &JwtConfig) -> Result<Self, DomainError> {
        Self::new(&config.private_key_path, &config.public_key_path)
    }

    /// Creates a key manager from PEM strings (tests, embedded keys)
    pub fn from_pem_strings(private_key_pem: &str, public_key_pem: &str) -> Result<Self, DomainError> {
        let (encoding_key, decoding_key) =
            Self::parse(private_key_pem.as_bytes(), public_key_pem.as_bytes())?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_path: PathBuf::from("memory"),
            public_key_path: PathBuf::from("memory"),
        })
    }

    fn parse(private_pem: &[u8], public_pem: &[u8]) -> Result<(EncodingKey, DecodingKey), DomainError> {
        let encoding_key = EncodingKey::from_ed_pem(private_pem).map_err(|e| DomainError::KeyLoad {
            message: format!("Invalid private key format: {}", e),
        })?;
        let decoding_key = DecodingKey::from_ed_pem(public_pem).map_err(|e| DomainError::KeyLoad {
            message: format!("Invalid public key format: {}", e),
        })?;
        Ok((encoding_key, decoding_key))
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths the keys were loaded from (`memory` for PEM strings)
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}
