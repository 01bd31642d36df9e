//! Configuration loading
//!
//! Values are layered: built-in defaults, then `magpie.toml`, then the
//! environment, then whatever the caller overrides (CLI flags).

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

use std::path::{Path, PathBuf};

pub use parser::{parse_magpie_toml, parse_magpie_toml_str};
pub use paths::{cache_file_path, default_config_path, resolve_cache_dir};
pub use schema::{MagpieConfig, RepositoryConfig};
pub use store::ConfigStore;

/// Configuration with every optional location resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub github_token: Option<String>,
    pub cache_dir: PathBuf,
    pub repository: RepositoryConfig,
}

impl ResolvedConfig {
    /// Path of the cache record
    pub fn cache_file(&self) -> PathBuf {
        cache_file_path(&self.cache_dir)
    }
}

impl MagpieConfig {
    /// Resolve relative and missing locations against `cwd`.
    pub fn resolve(&self, cwd: &Path) -> ResolvedConfig {
        ResolvedConfig {
            github_token: self.token().map(str::to_string),
            cache_dir: resolve_cache_dir(self.cache_dir.as_deref(), cwd),
            repository: self.repository.clone(),
        }
    }
}
