//! `emoji.*` operations

use serde_json::json;

use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};

use super::HandlerResult;
use crate::protocol::Request;
use crate::state::AppState;

/// `emoji.insert` - record an emoji for a user, always `true`
pub async fn insert<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let uid = request.required_str("uid")?;
    let emoji = request.required_i32("emoji")?;
    Ok(json!(state.accounts.insert_emoji(uid, emoji).await?))
}

/// `emoji.query` - history for one user, or everyone's with owners
pub async fn query<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let uid = request.non_empty_str("uid")?;
    Ok(serde_json::to_value(state.accounts.query_emojis(uid).await?)?)
}
