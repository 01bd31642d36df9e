//! File-backed cache for the registry payload
//!
//! One file holds the raw bytes of the last successful remote fetch. Its
//! modification time is the only freshness signal; the payload itself is
//! never inspected.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;

use super::{CachedPayload, PayloadCache};
use crate::config::cache_file_path;

/// How long a cached payload is trusted (24 hours)
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Mode of the cache record; temp files start out owner-only
#[cfg(unix)]
const CACHE_FILE_MODE: u32 = 0o644;

/// Snapshot of the cache record for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub age: Option<Duration>,
    pub fresh: bool,
}

/// Durable, time-aware storage of one registry payload
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    path: PathBuf,
    window: Duration,
}

impl CacheStore {
    /// Store the record as `registry.json` inside `dir`.
    pub fn new(dir: PathBuf) -> Self {
        let path = cache_file_path(&dir);
        Self {
            dir,
            path,
            window: FRESHNESS_WINDOW,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Create the cache directory if it is missing.
    ///
    /// Failure is logged and reported as `false`; later reads then find
    /// nothing and writes fail quietly.
    pub fn ensure_storage_ready(&self) -> bool {
        if self.dir.is_dir() {
            return true;
        }
        match std::fs::create_dir_all(&self.dir) {
            Ok(()) => {
                tracing::info!(path = %self.dir.display(), "Cache directory created");
                true
            }
            Err(e) => {
                tracing::error!(
                    path = %self.dir.display(),
                    error = %e,
                    "Failed to create cache directory"
                );
                false
            }
        }
    }

    /// Whether a record exists and is younger than the freshness window
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(SystemTime::now())
    }

    /// Freshness as seen at `now`.
    ///
    /// A record written at `T` is fresh for `now < T + window` and stale from
    /// `T + window` on. A modification time in the future counts as age zero.
    pub fn is_fresh_at(&self, now: SystemTime) -> bool {
        self.fresh_record_time(now).is_some()
    }

    /// Age and freshness of the record, for diagnostics
    pub fn status(&self) -> CacheStatus {
        let now = SystemTime::now();
        let age = self.modified().map(|mtime| age_at(mtime, now));
        CacheStatus {
            path: self.path.clone(),
            exists: age.is_some(),
            age,
            fresh: age.is_some_and(|age| age < self.window),
        }
    }

    fn fresh_record_time(&self, now: SystemTime) -> Option<SystemTime> {
        let mtime = self.modified()?;
        let age = age_at(mtime, now);
        if age < self.window {
            Some(mtime)
        } else {
            tracing::debug!(path = %self.path.display(), ?age, "Cache expired");
            None
        }
    }

    fn modified(&self) -> Option<SystemTime> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to stat cache record"
                );
                return None;
            }
        };
        match metadata.modified() {
            Ok(mtime) => Some(mtime),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Cache record has no modification time"
                );
                None
            }
        }
    }

    fn persist(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(CACHE_FILE_MODE))?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl PayloadCache for CacheStore {
    fn read(&self) -> Option<CachedPayload> {
        let written_at = self.fresh_record_time(SystemTime::now())?;
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                tracing::info!(path = %self.path.display(), "Loading registry from cache");
                Some(CachedPayload { bytes, written_at })
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read cache record"
                );
                None
            }
        }
    }

    fn write(&self, bytes: &[u8]) {
        match self.persist(bytes) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Registry data cached");
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to write cache record"
                );
            }
        }
    }
}

fn age_at(mtime: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(mtime).unwrap_or(Duration::ZERO)
}
