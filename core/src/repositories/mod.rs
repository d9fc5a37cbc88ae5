//! Repository interfaces for the stores the core depends on.

pub mod emoji;
pub mod revocation;
pub mod user;

pub use emoji::EmojiRepository;
pub use revocation::RevocationStore;
pub use user::UserRepository;

#[cfg(any(test, feature = "mock-repositories"))]
pub use emoji::MockEmojiRepository;
#[cfg(any(test, feature = "mock-repositories"))]
pub use revocation::MockRevocationStore;
#[cfg(any(test, feature = "mock-repositories"))]
pub use user::MockUserRepository;
