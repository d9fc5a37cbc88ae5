//! Business services
//!
//! - `clock` - Injected time source
//! - `token` - Token codec and signing keys
//! - `session` - Token issuance, validation and revocation
//! - `account` - User records and emoji inventory

pub mod account;
pub mod clock;
pub mod session;
pub mod token;

pub use account::AccountService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::SessionAuthority;
pub use token::{EdDsaKeyManager, TokenCodec, TokenCodecConfig};
