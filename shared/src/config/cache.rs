//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the revocation cache
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Per-command response timeout in milliseconds
    #[serde(default = "default_response_timeout")]
    pub response_timeout: u64,

    /// Prefix prepended to every revoked token key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379/0"),
            connection_timeout: default_connection_timeout(),
            response_timeout: default_response_timeout(),
            key_prefix: default_key_prefix(),
            max_retries: default_max_retries(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_response_timeout() -> u64 {
    2000
}

fn default_key_prefix() -> String {
    String::from("invalid:")
}

fn default_max_retries() -> u32 {
    3
}
