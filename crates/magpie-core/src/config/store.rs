//! Config store for loading magpie.toml.

use std::path::{Path, PathBuf};

use super::{MagpieConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location (`<config_dir>/magpie/magpie.toml`).
    pub fn from_default_location() -> anyhow::Result<Self> {
        let config_path = paths::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::from_path(config_path))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the file, or defaults when it does not exist.
    pub fn load(&self) -> anyhow::Result<MagpieConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                path = %self.config_path.display(),
                "No config file, using defaults"
            );
            return Ok(MagpieConfig::default());
        }
        parser::parse_magpie_toml(&self.config_path)
    }
}
