//! Cache module for Redis-backed revocation
//!
//! A multiplexed Redis client with retry and timeouts, and the revocation
//! store built on top of it.

pub mod redis_client;
pub mod revocation_cache;


pub use redis_client::RedisClient;
pub use revocation_cache::RedisRevocationStore;

// Re-export commonly used types
pub use ne_shared::CacheConfig;
