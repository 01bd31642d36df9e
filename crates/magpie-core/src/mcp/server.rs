//! Stdio request loop

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::protocol::{PROTOCOL_VERSION, Request, RpcError, RpcResult, success};
use crate::tools::{ComponentTools, ToolCallError};

pub const SERVER_NAME: &str = "Magic UI Components";

/// Serves the component tools over newline-delimited JSON-RPC
pub struct McpServer {
    tools: ComponentTools,
}

impl McpServer {
    pub fn new(tools: ComponentTools) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ComponentTools {
        &self.tools
    }

    /// Read requests until EOF, answering each before reading the next.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read from transport")?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected message that is not UTF-8");
                    Some(RpcError::parse_error(format!("Parse error: {e}")).to_json(None))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let mut bytes = serde_json::to_vec(&response).context("Failed to encode response")?;
            bytes.push(b'\n');
            writer
                .write_all(&bytes)
                .await
                .context("Failed to write to transport")?;
            writer.flush().await.context("Failed to flush transport")?;
        }

        tracing::info!("Transport closed");
        Ok(())
    }

    /// Response for one input line, or `None` for notifications
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let request = match Request::parse(line) {
            Ok(request) => request,
            Err((id, err)) => {
                tracing::warn!(error = %err, "Rejected malformed message");
                return Some(err.to_json(id));
            }
        };

        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        };

        tracing::debug!(method = %request.method, "Request received");
        match self.dispatch(&request.method, request.params.as_ref()).await {
            Ok(result) => Some(success(id, result)),
            Err(err) => {
                tracing::debug!(method = %request.method, error = %err, "Request failed");
                Some(err.to_json(Some(id)))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<&Value>) -> RpcResult<Value> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": ComponentTools::descriptors() })),
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, params: Option<&Value>) -> RpcResult<Value> {
        let params = params.ok_or_else(|| RpcError::invalid_params("Missing params"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;
        let empty = json!({});
        let arguments = params.get("arguments").unwrap_or(&empty);

        let response = self
            .tools
            .call(name, arguments)
            .await
            .map_err(|e: ToolCallError| RpcError::invalid_params(e.to_string()))?;

        serde_json::to_value(response).map_err(|e| RpcError::internal_error(e.to_string()))
    }
}
