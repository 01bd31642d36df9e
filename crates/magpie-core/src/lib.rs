//! Magpie Core Library
//!
//! Loads a UI component registry from a local cache, the upstream GitHub
//! repository, or a built-in dataset, and exposes it to agents as MCP tools.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod context;
pub mod mcp;
pub mod registry;
pub mod remote;
pub mod tools;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, MagpieConfig, RepositoryConfig, ResolvedConfig};

    // Cache
    pub use crate::cache::{CacheStatus, CacheStore, PayloadCache};

    // Remote
    pub use crate::remote::{GitHubClient, RemoteError, RemoteSource, RetryPolicy};

    // Registry
    pub use crate::registry::{Registry, RegistryEntry, RegistryLoader, RegistrySource};

    // Catalog and tools
    pub use crate::catalog::{Catalog, Component};
    pub use crate::tools::{ComponentTools, ToolResponse};

    // Server
    pub use crate::context::AppContext;
    pub use crate::mcp::McpServer;
}
