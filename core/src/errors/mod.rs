//! Domain-specific error types and error handling.

use thiserror::Error;

/// Reasons a session token is not valid
///
/// Callers of the public validation API never see these; they exist so the
/// authority can log which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Token issued before the last credential change")]
    Stale,

    #[error("Token bound to an unknown user")]
    UnknownUser,

    #[error("Token state could not be confirmed: store unavailable")]
    StoreUnavailable,
}

impl TokenError {
    /// Short machine-readable label for structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed",
            TokenError::Expired => "expired",
            TokenError::Revoked => "revoked",
            TokenError::Stale => "stale",
            TokenError::UnknownUser => "unknown_user",
            TokenError::StoreUnavailable => "store_unavailable",
        }
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Key load error: {message}")]
    KeyLoad { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Whether the failure came from an unreachable or timed-out store
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable { .. } | DomainError::Token(TokenError::StoreUnavailable)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
