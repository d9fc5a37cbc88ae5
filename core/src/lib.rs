//! # NoEmoji Core
//!
//! Domain layer of the NoEmoji server: session token claims, the token codec,
//! the session authority that decides whether a token is still alive, and
//! the account rules behind the user and emoji operations. Storage is
//! reached only through the repository traits in [`repositories`].

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    token_fingerprint, Claims, EmojiEntry, EmojiRecord, User, UserChanges, UserView,
    TOKEN_VALIDITY_MS,
};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{EmojiRepository, RevocationStore, UserRepository};
pub use services::{
    AccountService, Clock, EdDsaKeyManager, ManualClock, SessionAuthority, SystemClock,
    TokenCodec, TokenCodecConfig,
};
