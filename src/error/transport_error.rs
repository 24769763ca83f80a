use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// An error reported by the transport or by the remote node.
///
/// This crate never interprets it; it is handed back to the caller unchanged.
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransportError {
    /// JSON-RPC error code, when the node produced one.
    pub code: Option<i64>,
    pub message: String,
    pub data: Option<Value>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            data: None,
        }
    }
}
