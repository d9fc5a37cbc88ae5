//! Wire protocol: JSON requests in, one text frame (or nothing) out.
//!
//! A request is a JSON object whose `op` names the operation; the remaining
//! keys are operation arguments. Replies carry no request id, so pairing is
//! purely by order on the connection.

use serde_json::{Map, Value};
use thiserror::Error;

/// Malformed request errors, sent back verbatim as the reply text
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request must be a JSON object")]
    NotAnObject,

    #[error("missing field 'op'")]
    MissingOp,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// A decoded request
#[derive(Debug, Clone)]
pub struct Request {
    op: String,
    fields: Map<String, Value>,
}

impl Request {
    /// Parse one text frame
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let mut fields = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            _ => return Err(ProtocolError::NotAnObject),
        };
        let op = match fields.remove("op") {
            Some(Value::String(op)) => op,
            Some(_) => {
                return Err(ProtocolError::InvalidField {
                    field: "op",
                    expected: "a string",
                })
            }
            None => return Err(ProtocolError::MissingOp),
        };
        Ok(Self { op, fields })
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    /// A string field that must be present and non-null
    pub fn required_str(&self, field: &'static str) -> Result<&str, ProtocolError> {
        self.nullable_str(field)?
            .ok_or(ProtocolError::InvalidField {
                field,
                expected: "a string",
            })
    }

    /// A string field that must be present but may be `null`
    pub fn nullable_str(&self, field: &'static str) -> Result<Option<&str>, ProtocolError> {
        match self.fields.get(field) {
            None => Err(ProtocolError::MissingField(field)),
            Some(value) => as_optional_str(field, value),
        }
    }

    /// A string field that may be absent or `null`
    pub fn optional_str(&self, field: &'static str) -> Result<Option<&str>, ProtocolError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(value) => as_optional_str(field, value),
        }
    }

    /// Like [`optional_str`](Self::optional_str), with `""` treated as absent
    pub fn non_empty_str(&self, field: &'static str) -> Result<Option<&str>, ProtocolError> {
        Ok(self.optional_str(field)?.filter(|s| !s.is_empty()))
    }

    /// A boolean flag; absent or `null` reads as `false`
    pub fn flag(&self, field: &'static str) -> Result<bool, ProtocolError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) if n.as_i64().is_some() => Ok(n.as_i64() != Some(0)),
            Some(_) => Err(ProtocolError::InvalidField {
                field,
                expected: "a boolean",
            }),
        }
    }

    /// A required 32-bit integer field
    pub fn required_i32(&self, field: &'static str) -> Result<i32, ProtocolError> {
        let value = self
            .fields
            .get(field)
            .ok_or(ProtocolError::MissingField(field))?;
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(ProtocolError::InvalidField {
                field,
                expected: "a 32-bit integer",
            })
    }
}

fn as_optional_str<'a>(field: &'static str, value: &'a Value) -> Result<Option<&'a str>, ProtocolError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ProtocolError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

/// Outcome of one request
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Handler result, JSON encoded
    Json(Value),
    /// Error text, sent as-is
    Error(String),
    /// Nothing is sent
    Silent,
}

impl Reply {
    /// Text frame to send, if any
    pub fn into_frame(self) -> Option<String> {
        match self {
            Reply::Json(value) => Some(value.to_string()),
            Reply::Error(message) => Some(message),
            Reply::Silent => None,
        }
    }
}
