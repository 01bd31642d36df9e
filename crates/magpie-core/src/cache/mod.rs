//! Local cache of the registry payload

pub mod store;

use std::time::SystemTime;

pub use store::{CacheStatus, CacheStore, FRESHNESS_WINDOW};

/// Bytes of a fresh cache record plus the time they were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPayload {
    pub bytes: Vec<u8>,
    pub written_at: SystemTime,
}

/// Storage for the last fetched registry payload.
///
/// Neither operation fails: a broken cache looks like an empty one.
pub trait PayloadCache: Send + Sync {
    /// The stored bytes, only while they are still fresh
    fn read(&self) -> Option<CachedPayload>;

    /// Replace the stored record; failures are logged
    fn write(&self, bytes: &[u8]);
}
