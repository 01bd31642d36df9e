//! Remote source of the registry and component files
//!
//! [`GitHubClient`] is the production implementation; the loader and the
//! tools only see the [`RemoteSource`] trait so tests can substitute stubs.

pub mod error;
pub mod github;
pub mod retry;

use async_trait::async_trait;

pub use error::RemoteError;
pub use github::{ContentResponse, DirectoryItem, FileContent, GitHubClient, REGISTRY_PATHS};
pub use retry::RetryPolicy;

/// Read access to the upstream repository.
///
/// Both operations swallow their failures after logging them.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Raw bytes of the registry file, from whichever known location answers
    async fn fetch_registry_payload(&self) -> Option<Vec<u8>>;

    /// Decoded text of one file; empty when it could not be fetched
    async fn fetch_file_content(&self, path: &str) -> String;
}
