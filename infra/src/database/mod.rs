//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema bootstrap
//! - MySQL implementations of the user and emoji repositories

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlEmojiRepository, MySqlUserRepository};
