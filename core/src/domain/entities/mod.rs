//! Domain entities representing core business objects.

pub mod emoji;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use emoji::{EmojiEntry, EmojiRecord};
pub use token::{token_fingerprint, Claims, TOKEN_VALIDITY_MS};
pub use user::{User, UserChanges, UserView};
