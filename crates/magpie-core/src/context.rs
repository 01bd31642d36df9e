//! Application context for unified dependency injection.

use std::sync::Arc;

use anyhow::Result;

use crate::cache::{CacheStore, PayloadCache};
use crate::config::ResolvedConfig;
use crate::mcp::McpServer;
use crate::registry::RegistryLoader;
use crate::remote::{GitHubClient, RemoteSource};
use crate::tools::ComponentTools;

/// Shared services built from resolved configuration.
///
/// Frontends create this once at startup, load the registry through it and
/// hand the result to the server or to a one-shot command.
#[derive(Clone)]
pub struct AppContext {
    config: ResolvedConfig,
    cache: Arc<CacheStore>,
    remote: Arc<dyn RemoteSource>,
}

impl AppContext {
    /// Build the cache store and GitHub client for `config`.
    ///
    /// The cache directory is created here; if that fails the process keeps
    /// running without a usable cache.
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        let remote = GitHubClient::new(&config.repository, config.github_token.clone())?;
        Ok(Self::with_remote(config, Arc::new(remote)))
    }

    /// Create context with a custom remote source (for testing).
    pub fn with_remote(config: ResolvedConfig, remote: Arc<dyn RemoteSource>) -> Self {
        let cache = Arc::new(CacheStore::new(config.cache_dir.clone()));
        cache.ensure_storage_ready();
        Self {
            config,
            cache,
            remote,
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn cache_store(&self) -> &CacheStore {
        &self.cache
    }

    pub fn remote(&self) -> Arc<dyn RemoteSource> {
        Arc::clone(&self.remote)
    }

    /// A fresh loader over this context's cache and remote
    pub fn registry_loader(&self) -> RegistryLoader {
        let cache: Arc<dyn PayloadCache> = self.cache.clone();
        RegistryLoader::new(cache, self.remote())
    }

    /// Load the registry and wrap it in the component tools.
    pub async fn load_tools(&self) -> ComponentTools {
        let registry = self.registry_loader().load().await;
        ComponentTools::new(Arc::new(registry), self.remote())
    }

    /// Load the registry and build a server ready to accept requests.
    pub async fn mcp_server(&self) -> McpServer {
        McpServer::new(self.load_tools().await)
    }
}
