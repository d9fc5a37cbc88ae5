//! Session authority: issue, validate and revoke session tokens
//!
//! A token is valid iff its signature verifies, it has not reached
//! `expires_at`, it is not in the revocation store, and it was issued strictly
//! after its owner's last credential change.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionAuthority;
