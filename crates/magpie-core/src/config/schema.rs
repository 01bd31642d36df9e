//! Schema for magpie.toml

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

pub const DEFAULT_OWNER: &str = "magicuidesign";
pub const DEFAULT_REPO: &str = "magicui";
pub const DEFAULT_COMPONENTS_PATH: &str = "components";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Top-level magpie.toml structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MagpieConfig {
    /// GitHub access token. Absence only narrows the API quota.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Directory holding the cached registry.json
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Upstream repository coordinates
    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// Upstream repository the registry and component sources are read from
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub name: String,

    /// Directory holding one sub-directory per component
    #[serde(default = "default_components_path")]
    pub components_path: String,

    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: Url,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

fn default_components_path() -> String {
    DEFAULT_COMPONENTS_PATH.to_string()
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_repo(),
            components_path: default_components_path(),
            api_url: default_api_url(),
        }
    }
}

impl MagpieConfig {
    /// Validate field contents after parsing
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.repository.owner.trim().is_empty() {
            anyhow::bail!("repository.owner must not be empty");
        }
        if self.repository.name.trim().is_empty() {
            anyhow::bail!("repository.name must not be empty");
        }
        match self.repository.api_url.scheme() {
            "http" | "https" => {}
            other => anyhow::bail!("repository.api_url must be http or https, got '{}'", other),
        }
        Ok(())
    }

    /// Overlay values from the environment.
    ///
    /// `GITHUB_TOKEN` sets the token; `MAGPIE_CACHE_DIR` (or the older
    /// `CACHE_PATH`) sets the cache directory. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Some(dir) = non_empty("MAGPIE_CACHE_DIR").or_else(|| non_empty("CACHE_PATH")) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
    }

    /// Token with blank values treated as absent
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
