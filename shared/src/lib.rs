//! Shared configuration types for the NoEmoji server
//!
//! Every crate in the workspace reads its settings from [`AppConfig`], which is
//! loaded once at startup and handed down explicitly.

pub mod config;

pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, ServerConfig,
};
