//! MCP (Model Context Protocol) stdio server

pub mod protocol;
pub mod server;

pub use protocol::{PROTOCOL_VERSION, Request, RpcError, RpcErrorCode};
pub use server::{McpServer, SERVER_NAME};
