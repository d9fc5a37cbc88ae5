//! `user.*` operations

use serde_json::{json, Value};
use tracing::debug;

use ne_core::domain::entities::user::UserChanges;
use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};

use super::HandlerResult;
use crate::protocol::Request;
use crate::state::AppState;

/// `user.mod` - create or update a user, returns `true`
pub async fn modify<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let changes = UserChanges {
        uid: request.required_str("uid")?.to_string(),
        password_hash: request.non_empty_str("pwh")?.map(str::to_string),
        display_name: request.optional_str("name")?.map(str::to_string),
        phone: request.optional_str("tel")?.map(str::to_string),
        email: request.optional_str("email")?.map(str::to_string),
        is_superuser: request.flag("super")?,
    };

    let stored = state.accounts.modify_user(changes).await?;
    Ok(json!(stored))
}

/// `user.mktoken` - returns a fresh token string
pub async fn make_token<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let uid = request.required_str("uid")?;
    let token = state.sessions.issue(uid)?;
    Ok(Value::String(token))
}

/// `user.query` - one user (or `null`) by uid, every user without one
pub async fn query<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    match request.non_empty_str("uid")? {
        Some(uid) => Ok(serde_json::to_value(state.accounts.query_user(uid).await?)?),
        None => Ok(serde_json::to_value(state.accounts.list_users().await?)?),
    }
}

/// `user.validate` - whether the token is valid and belongs to uid
pub async fn validate<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let uid = request.nullable_str("uid")?.unwrap_or_default();
    let token = request.nullable_str("token")?.unwrap_or_default();

    let valid = state.sessions.validate_for(uid, token).await;
    debug!(uid = %uid, valid, "validated token");
    Ok(Value::Bool(valid))
}

/// `user.rmtoken` - revoke a token, returns `null`
pub async fn remove_token<U, E, R>(state: &AppState<U, E, R>, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let token = request.required_str("token")?;
    state.sessions.revoke(token).await?;
    Ok(Value::Null)
}
