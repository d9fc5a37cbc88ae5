//! Services shared by every connection

use std::sync::Arc;

use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};
use ne_core::services::{AccountService, Clock, SessionAuthority, TokenCodec};

/// Collaborators handed to every handler
///
/// Built once at startup and shared behind an `Arc`; nothing here is global.
pub struct AppState<U, E, R>
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    pub sessions: SessionAuthority<U, R>,
    pub accounts: AccountService<U, E>,
}

impl<U, E, R> AppState<U, E, R>
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    pub fn new(
        users: Arc<U>,
        emojis: Arc<E>,
        revocations: Arc<R>,
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions: SessionAuthority::new(users.clone(), revocations, codec, clock.clone()),
            accounts: AccountService::new(users, emojis, clock),
        }
    }
}
