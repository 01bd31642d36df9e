//! Config and cache path resolution helpers.

use std::path::{Path, PathBuf};

/// Directory name used under the working directory when no cache dir is configured
pub const DEFAULT_CACHE_DIR_NAME: &str = "cache";

/// File name of the cached registry payload
pub const CACHE_FILE_NAME: &str = "registry.json";

/// `<config_dir>/magpie/magpie.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("magpie").join("magpie.toml"))
}

/// Resolve the cache directory: the configured one, or `<cwd>/cache`
pub fn resolve_cache_dir(configured: Option<&Path>, cwd: &Path) -> PathBuf {
    match configured {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd.join(DEFAULT_CACHE_DIR_NAME),
    }
}

/// Location of the cache record inside a cache directory
pub fn cache_file_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(CACHE_FILE_NAME)
}
