//! Operation handlers
//!
//! Each handler reads its arguments from the [`Request`](crate::protocol::Request)
//! and returns the JSON value to send back.

pub mod emoji;
pub mod user;

use ne_core::errors::DomainError;
use thiserror::Error;

use crate::protocol::ProtocolError;

/// Anything a handler can fail with; the display text is the reply
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type HandlerResult = Result<serde_json::Value, HandlerError>;
