//! Operation router
//!
//! Maps the `op` of each request to its handler. Unknown operations produce
//! no reply at all.

use tracing::{debug, warn};

use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};

use crate::handlers::{emoji, user, HandlerResult};
use crate::protocol::{Reply, Request};
use crate::state::AppState;

/// Every operation the server answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    UserMod,
    UserMkToken,
    UserQuery,
    UserValidate,
    UserRmToken,
    EmojiInsert,
    EmojiQuery,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::UserMod,
        Operation::UserMkToken,
        Operation::UserQuery,
        Operation::UserValidate,
        Operation::UserRmToken,
        Operation::EmojiInsert,
        Operation::EmojiQuery,
    ];

    /// Look up an operation by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Wire name
    pub fn name(self) -> &'static str {
        match self {
            Operation::UserMod => "user.mod",
            Operation::UserMkToken => "user.mktoken",
            Operation::UserQuery => "user.query",
            Operation::UserValidate => "user.validate",
            Operation::UserRmToken => "user.rmtoken",
            Operation::EmojiInsert => "emoji.insert",
            Operation::EmojiQuery => "emoji.query",
        }
    }
}

/// Handle one text frame and decide what to send back
pub async fn dispatch<U, E, R>(state: &AppState<U, E, R>, text: &str) -> Reply
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let request = match Request::parse(text) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "rejecting malformed request");
            return Reply::Error(e.to_string());
        }
    };

    let Some(operation) = Operation::from_name(request.op()) else {
        debug!(op = %request.op(), "ignoring unknown operation");
        return Reply::Silent;
    };

    match route(state, operation, &request).await {
        Ok(value) => Reply::Json(value),
        Err(e) => {
            warn!(op = operation.name(), error = %e, "operation failed");
            Reply::Error(e.to_string())
        }
    }
}

async fn route<U, E, R>(state: &AppState<U, E, R>, operation: Operation, request: &Request) -> HandlerResult
where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    debug!(op = operation.name(), "dispatching");
    match operation {
        Operation::UserMod => user::modify(state, request).await,
        Operation::UserMkToken => user::make_token(state, request).await,
        Operation::UserQuery => user::query(state, request).await,
        Operation::UserValidate => user::validate(state, request).await,
        Operation::UserRmToken => user::remove_token(state, request).await,
        Operation::EmojiInsert => emoji::insert(state, request).await,
        Operation::EmojiQuery => emoji::query(state, request).await,
    }
}
