//! Session token signing and verification
//!
//! - [`EdDsaKeyManager`] loads the Ed25519 key pair
//! - [`TokenCodec`] turns [`Claims`](crate::domain::entities::token::Claims)
//!   into signed tokens and back, without judging business validity

mod codec;
mod config;
mod key_manager;


pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
pub use key_manager::EdDsaKeyManager;
