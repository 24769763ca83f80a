use crate::constants::JSON_RPC_VERSION;
use crate::utils::next_request_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully encoded call: wire method name and wire params, ready for a transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    pub method: String,
    pub params: Vec<Value>,
}

impl WireRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Wraps the request in a JSON-RPC 2.0 envelope with a fresh request id.
    pub fn envelope(&self) -> JsonRpcRequest<'_> {
        JsonRpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            id: next_request_id(),
            method: &self.method,
            params: &self.params,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a [Value],
}
