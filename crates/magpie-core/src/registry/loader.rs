//! Three-tier registry loading
//!
//! The loader runs an ordered list of [`LoadStrategy`]s (cache, then remote)
//! and keeps the first payload that parses. When none does, the built-in
//! dataset is used, so loading always ends with a usable [`Registry`].
//!
//! Lifecycle: a [`RegistryLoader`] is the uninitialized state, the future
//! returned by [`RegistryLoader::load`] is the loading state, and the
//! [`Registry`] it resolves to is the ready state. `load` consumes the
//! loader, so a process cannot load twice through the same instance.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Registry, RegistrySource, normalize};
use crate::cache::PayloadCache;
use crate::remote::RemoteSource;

/// Registry bytes produced by one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub source: RegistrySource,
    /// When the bytes were obtained from upstream
    pub fetched_at: DateTime<Utc>,
}

/// One tier of the load policy
#[async_trait]
pub trait LoadStrategy: Send + Sync {
    fn source(&self) -> RegistrySource;

    /// Bytes from this tier, or `None` to fall through to the next one
    async fn acquire(&self) -> Option<Payload>;
}

/// Serves the cache record while it is fresh
pub struct CacheTier {
    cache: Arc<dyn PayloadCache>,
}

impl CacheTier {
    pub fn new(cache: Arc<dyn PayloadCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl LoadStrategy for CacheTier {
    fn source(&self) -> RegistrySource {
        RegistrySource::Cache
    }

    async fn acquire(&self) -> Option<Payload> {
        let cached = self.cache.read()?;
        Some(Payload {
            bytes: cached.bytes,
            source: RegistrySource::Cache,
            fetched_at: DateTime::<Utc>::from(cached.written_at),
        })
    }
}

/// Fetches from the remote and persists what it got before handing it on
pub struct RemoteTier {
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn PayloadCache>,
}

impl RemoteTier {
    pub fn new(remote: Arc<dyn RemoteSource>, cache: Arc<dyn PayloadCache>) -> Self {
        Self { remote, cache }
    }
}

#[async_trait]
impl LoadStrategy for RemoteTier {
    fn source(&self) -> RegistrySource {
        RegistrySource::Remote
    }

    async fn acquire(&self) -> Option<Payload> {
        let bytes = self.remote.fetch_registry_payload().await?;
        self.cache.write(&bytes);
        Some(Payload {
            bytes,
            source: RegistrySource::Remote,
            fetched_at: Utc::now(),
        })
    }
}

/// Builds the process-wide [`Registry`]
pub struct RegistryLoader {
    strategies: Vec<Box<dyn LoadStrategy>>,
}

impl RegistryLoader {
    /// Cache first, then remote, then the built-in dataset
    pub fn new(cache: Arc<dyn PayloadCache>, remote: Arc<dyn RemoteSource>) -> Self {
        Self::with_strategies(vec![
            Box::new(CacheTier::new(Arc::clone(&cache))),
            Box::new(RemoteTier::new(remote, cache)),
        ])
    }

    /// Custom tier order; the built-in dataset always comes last
    pub fn with_strategies(strategies: Vec<Box<dyn LoadStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the tiers in order and stop at the first payload that parses.
    pub async fn load(self) -> Registry {
        for strategy in &self.strategies {
            let tier = strategy.source();
            let Some(payload) = strategy.acquire().await else {
                tracing::debug!(%tier, "No registry payload from this tier");
                continue;
            };

            match normalize::parse_payload(&payload.bytes) {
                Ok(records) => {
                    let registry =
                        Registry::from_records(records, payload.source, Some(payload.fetched_at));
                    tracing::info!(
                        %tier,
                        components = registry.len(),
                        "Registry loaded"
                    );
                    return registry;
                }
                Err(e) => {
                    tracing::warn!(%tier, error = %e, "Discarding unusable registry payload");
                }
            }
        }

        let registry = Registry::builtin();
        tracing::warn!(
            components = registry.len(),
            "Using built-in registry as fallback"
        );
        registry
    }
}
