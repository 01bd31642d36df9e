//! JSON-RPC 2.0 framing for the MCP stdio transport

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};

pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorCode {
    /// Parse error (-32700)
    ParseError,
    /// Invalid request (-32600)
    InvalidRequest,
    /// Method not found (-32601)
    MethodNotFound,
    /// Invalid params (-32602)
    InvalidParams,
    /// Internal error (-32603)
    InternalError,
}

impl RpcErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            RpcErrorCode::ParseError => -32700,
            RpcErrorCode::InvalidRequest => -32600,
            RpcErrorCode::MethodNotFound => -32601,
            RpcErrorCode::InvalidParams => -32602,
            RpcErrorCode::InternalError => -32603,
        }
    }
}

/// An error reply
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: RpcErrorCode,
    pub message: String,
}

impl RpcError {
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::ParseError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::InvalidRequest, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            RpcErrorCode::MethodNotFound,
            format!("Method not found: {method}"),
        )
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::InvalidParams, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::InternalError, message)
    }

    /// Full error response for `id`
    pub fn to_json(&self, id: Option<Value>) -> Value {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "error": {
                "code": self.code.code(),
                "message": self.message,
            },
            "id": id
        })
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC Error {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for RpcError {}

pub type RpcResult<T> = Result<T, RpcError>;

/// A decoded request or notification
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    /// Absent (or null) for notifications
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Decode one line of input.
    ///
    /// On failure the error comes with whatever `id` could be recovered so the
    /// reply can still be correlated.
    pub fn parse(line: &str) -> Result<Self, (Option<Value>, RpcError)> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| (None, RpcError::parse_error(format!("Parse error: {e}"))))?;

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        if !value.is_object() {
            return Err((
                None,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        }

        let request: Request = serde_json::from_value(value)
            .map_err(|e| (id.clone(), RpcError::invalid_request(e.to_string())))?;

        if request.jsonrpc != JSONRPC_VERSION {
            return Err((
                id,
                RpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        Ok(request)
    }
}

/// Successful response for `id`
pub fn success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "result": result,
        "id": id
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RpcErrorCode::ParseError.code(), -32700);
        assert_eq!(RpcErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(RpcErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(RpcErrorCode::InvalidParams.code(), -32602);
    }

    #[test]
    fn test_error_to_json() {
        let err = RpcError::method_not_found("resources/list");
        let json = err.to_json(Some(json!(7)));

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["error"]["code"], -32601);
        assert_eq!(json["error"]["message"], "Method not found: resources/list");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_parse_request() {
        let request =
            Request::parse(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).unwrap();
        assert_eq!(request.method, "tools/list");
        assert_eq!(request.id, Some(json!(1)));
        assert!(!request.is_notification());
    }

    #[test]
    fn test_parse_notification() {
        let request =
            Request::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(request.is_notification());
    }

    #[test]
    fn test_parse_garbage() {
        let (id, err) = Request::parse("{not json").unwrap_err();
        assert!(id.is_none());
        assert_eq!(err.code, RpcErrorCode::ParseError);
    }

    #[test]
    fn test_parse_missing_method_keeps_id() {
        let (id, err) = Request::parse(r#"{"jsonrpc":"2.0","id":"abc"}"#).unwrap_err();
        assert_eq!(id, Some(json!("abc")));
        assert_eq!(err.code, RpcErrorCode::InvalidRequest);
    }

    #[test]
    fn test_parse_wrong_version() {
        let (_, err) = Request::parse(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#).unwrap_err();
        assert_eq!(err.code, RpcErrorCode::InvalidRequest);
    }

    #[test]
    fn test_parse_array_rejected() {
        let (_, err) = Request::parse("[]").unwrap_err();
        assert_eq!(err.code, RpcErrorCode::InvalidRequest);
    }
}
