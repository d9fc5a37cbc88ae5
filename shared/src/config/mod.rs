//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing keys and validity window
//! - `cache` - Redis revocation cache
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging configuration
//! - `server` - WebSocket listener

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "runtime.toml";

/// Prefix for environment variable overrides, e.g. `NOEMOJI__DATABASE__URL`
pub const ENV_PREFIX: &str = "NOEMOJI";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Revocation cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply
    /// `NOEMOJI__SECTION__KEY` environment overrides.
    ///
    /// A missing file is not an error; every section has defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the token engine cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.auth.jwt.is_supported_algorithm() {
            return Err(ConfigError::Invalid(format!(
                "unsupported token algorithm '{}', expected '{}'",
                self.auth.jwt.algorithm,
                auth::TOKEN_ALGORITHM
            )));
        }
        if self.auth.jwt.token_validity_ms <= 0 {
            return Err(ConfigError::Invalid(String::from(
                "auth.jwt.token_validity_ms must be positive",
            )));
        }
        if self.database.query_timeout_ms == 0 || self.cache.response_timeout == 0 {
            return Err(ConfigError::Invalid(String::from(
                "storage timeouts must be non-zero",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("/definitely/not/here/runtime.toml").unwrap();
        assert_eq!(config.server.port, 8765);
        assert_eq!(config.cache.key_prefix, "invalid:");
        assert_eq!(config.auth.jwt.token_validity_ms, 604_800_000);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9001

[database]
url = "mysql://noemoji:secret@db:3306/noemoji"
query_timeout_ms = 750

[auth.jwt]
private_key_path = "/etc/noemoji/private.pem"
public_key_path = "/etc/noemoji/public.pem"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:9001");
        assert_eq!(config.database.query_timeout_ms, 750);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.jwt.public_key_path, "/etc/noemoji/public.pem");
        assert_eq!(config.auth.jwt.algorithm, "EdDSA");
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[cache]
key_prefix = "revoked:"

[auth.jwt]
token_validity_ms = 60000
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.bind_address(), "localhost:9100");
        assert_eq!(config.cache.key_prefix, "revoked:");
        assert_eq!(config.cache.url, "redis://localhost:6379/0");
        assert_eq!(config.auth.jwt.token_validity_ms, 60_000);
        assert_eq!(config.auth.jwt.private_key_path, "keys/jwt_private.pem");
    }

    #[test]
    fn test_single_env_override() {
        std::env::set_var("NOEMOJI__CACHE__RESPONSE_TIMEOUT", "1500");
        let loaded = AppConfig::load("/definitely/not/here/runtime.toml");
        std::env::remove_var("NOEMOJI__CACHE__RESPONSE_TIMEOUT");

        let config = loaded.unwrap();
        assert_eq!(config.cache.response_timeout, 1500);
        assert_eq!(config.cache.url, "redis://localhost:6379/0");
        assert_eq!(config.cache.key_prefix, "invalid:");
    }

    #[test]
    fn test_rejects_foreign_algorithm() {
        let mut config = AppConfig::default();
        config.auth.jwt.algorithm = String::from("RS256");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_positive_validity() {
        let mut config = AppConfig::default();
        config.auth.jwt.token_validity_ms = 0;
        assert!(config.validate().is_err());
    }
}
