//! Request/reply packets exchanged over the messaging fabric.
//!
//! Requests travel as `{ "id", "pattern", "data" }` and replies as
//! `{ "id", "response" | "err", "isDisposed" }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Status carried by an error reply when the remote side did not send one.
const DEFAULT_ERROR_STATUS: u16 = 400;

/// Request packet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPacket<T> {
    /// Correlation id, echoed in the reply
    #[serde(default)]
    pub id: Option<String>,

    /// Pattern the request was sent to
    #[serde(default)]
    pub pattern: Option<Value>,

    pub data: T,
}

impl<T> RequestPacket<T> {
    /// Build a request packet with a fresh correlation id.
    pub fn new(pattern: Value, data: T) -> Self {
        Self {
            id: Some(Uuid::now_v7().to_string()),
            pattern: Some(pattern),
            data,
        }
    }
}

/// Reply packet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyPacket<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<RpcError>,

    #[serde(default)]
    pub is_disposed: bool,
}

impl<T> ReplyPacket<T> {
    /// Successful reply to the request with the given id.
    pub fn ok(id: Option<String>, response: T) -> Self {
        Self {
            id,
            response: Some(response),
            err: None,
            is_disposed: true,
        }
    }

    /// Error reply to the request with the given id.
    pub fn error(id: Option<String>, err: RpcError) -> Self {
        Self {
            id,
            response: None,
            err: Some(err),
            is_disposed: true,
        }
    }

    /// Split the reply into its response or error.
    ///
    /// # Errors
    ///
    /// Returns the carried error, or a 500 error when the reply holds neither.
    pub fn into_result(self) -> Result<T, RpcError> {
        match (self.err, self.response) {
            (Some(err), _) => Err(err),
            (None, Some(response)) => Ok(response),
            (None, None) => Err(RpcError::new(500, "reply carried no response")),
        }
    }
}

/// Error reported across the messaging boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(from = "RawRpcError")]
#[error("{message} ({status})")]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Shapes an error may arrive in from other services.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRpcError {
    Structured {
        #[serde(default)]
        status: Option<u16>,
        #[serde(default)]
        message: Option<Value>,
    },
    Text(String),
}

impl From<RawRpcError> for RpcError {
    fn from(raw: RawRpcError) -> Self {
        match raw {
            RawRpcError::Structured { status, message } => {
                let message = match message {
                    Some(Value::String(text)) => text,
                    Some(Value::Array(parts)) => parts
                        .iter()
                        .map(|part| part.as_str().map_or_else(|| part.to_string(), str::to_string))
                        .collect::<Vec<_>>()
                        .join(", "),
                    Some(other) => other.to_string(),
                    None => "unknown error".to_string(),
                };

                Self::new(status.unwrap_or(DEFAULT_ERROR_STATUS), message)
            }
            RawRpcError::Text(message) => Self::new(DEFAULT_ERROR_STATUS, message),
        }
    }
}
