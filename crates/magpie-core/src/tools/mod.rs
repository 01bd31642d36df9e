//! Tools exposed to the calling agent
//!
//! - `get_all_components`: the raw registry records (or the catalog view
//!   when no raw records exist)
//! - `get_component_by_path`: source text of one upstream file

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::catalog::Catalog;
use crate::registry::Registry;
use crate::remote::RemoteSource;

pub const GET_ALL_COMPONENTS: &str = "get_all_components";
pub const GET_COMPONENT_BY_PATH: &str = "get_component_by_path";

/// Error type for tool dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

/// A piece of tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of a tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Concatenated text of all content parts
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|ToolContent::Text { text }| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Name, description and input schema of a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Component lookup tools over a loaded registry
pub struct ComponentTools {
    registry: Arc<Registry>,
    catalog: Catalog,
    remote: Arc<dyn RemoteSource>,
}

impl ComponentTools {
    pub fn new(registry: Arc<Registry>, remote: Arc<dyn RemoteSource>) -> Self {
        let catalog = Catalog::from_registry(&registry);
        tracing::info!(components = catalog.len(), "Loaded components");
        Self {
            registry,
            catalog,
            remote,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn descriptors() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor {
                name: GET_ALL_COMPONENTS,
                description: "List every component in the registry with its metadata",
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            ToolDescriptor {
                name: GET_COMPONENT_BY_PATH,
                description: "Fetch the source of a component file by its repository path",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to the component file"
                        }
                    },
                    "required": ["path"]
                }),
            },
        ]
    }

    /// Dispatch a call by tool name
    pub async fn call(&self, name: &str, arguments: &Value) -> Result<ToolResponse, ToolCallError> {
        match name {
            GET_ALL_COMPONENTS => Ok(self.get_all_components()),
            GET_COMPONENT_BY_PATH => {
                let path = arguments
                    .get("path")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolCallError::InvalidArguments {
                        tool: name.to_string(),
                        reason: "missing string argument 'path'".to_string(),
                    })?;
                Ok(self.get_component_by_path(path).await)
            }
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }

    /// The raw records, pretty-printed; the catalog view if there are none.
    pub fn get_all_components(&self) -> ToolResponse {
        let raw = self.registry.raw_payload();
        let rendered = if raw.is_empty() {
            serde_json::to_string_pretty(self.catalog.components())
        } else {
            serde_json::to_string_pretty(raw)
        };

        match rendered {
            Ok(text) => ToolResponse::text(text),
            Err(e) => ToolResponse::error(format!("Failed to serialize components: {}", e)),
        }
    }

    /// Source text of one file, or an error response when nothing came back
    pub async fn get_component_by_path(&self, path: &str) -> ToolResponse {
        let content = self.remote.fetch_file_content(path).await;
        if content.is_empty() {
            return ToolResponse::error(format!(
                "Component file at path '{}' not found or empty",
                path
            ));
        }
        ToolResponse::text(content)
    }
}
