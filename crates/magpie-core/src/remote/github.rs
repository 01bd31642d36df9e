//! GitHub contents API client
//!
//! Reads the registry file and component sources from a fixed repository
//! through `GET /repos/{owner}/{repo}/contents/{path}`.

use anyhow::Context;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use super::{RemoteError, RemoteSource, RetryPolicy};
use crate::config::RepositoryConfig;

/// Registry file locations, newest layout first
pub const REGISTRY_PATHS: [&str; 2] = ["cache/registry.json", "registry.json"];

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryItem {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DirectoryItem {
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// A single file as returned by the contents API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decode the transport encoding into UTF-8 text
    pub fn decode(&self, path: &str) -> Result<String, RemoteError> {
        let content = self.content.as_deref().ok_or_else(|| RemoteError::NotAFile {
            path: path.to_string(),
        })?;

        match self.encoding.as_deref() {
            None | Some("base64") => {}
            Some(other) => {
                return Err(RemoteError::Decode {
                    path: path.to_string(),
                    reason: format!("unsupported encoding '{}'", other),
                });
            }
        }

        // GitHub wraps base64 bodies at 60 columns.
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| RemoteError::Decode {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        String::from_utf8(bytes).map_err(|e| RemoteError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Body of a contents API response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Directory(Vec<DirectoryItem>),
    File(FileContent),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Authenticated reader of one GitHub repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    owner: String,
    repo: String,
    components_path: String,
    token: Option<String>,
    retry: RetryPolicy,
}

impl GitHubClient {
    /// Build a client for `repository`.
    ///
    /// A missing token is not an error; it is warned about once here.
    pub fn new(repository: &RepositoryConfig, token: Option<String>) -> anyhow::Result<Self> {
        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() {
            tracing::warn!(
                "GitHub token not provided. API rate limits will be restricted. \
                 Create a token at https://github.com/settings/tokens and set GITHUB_TOKEN."
            );
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("magpie/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: repository.api_url.clone(),
            owner: repository.owner.clone(),
            repo: repository.name.clone(),
            components_path: repository.components_path.clone(),
            token,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `{api_url}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self, path: &str) -> Result<Url, RemoteError> {
        let mut url = self.api_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RemoteError::InvalidUrl(self.api_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    /// Read a path, retrying transient failures
    pub async fn get_content(&self, path: &str) -> Result<ContentResponse, RemoteError> {
        self.retry
            .run(path, || self.request_content(path))
            .await
    }

    /// Read and decode a single file
    pub async fn read_file(&self, path: &str) -> Result<String, RemoteError> {
        match self.get_content(path).await? {
            ContentResponse::File(file) => file.decode(path),
            ContentResponse::Directory(_) => Err(RemoteError::NotAFile {
                path: path.to_string(),
            }),
        }
    }

    /// Names of the component directories
    pub async fn list_components(&self) -> Vec<String> {
        match self.get_content(&self.components_path).await {
            Ok(ContentResponse::Directory(items)) => items
                .into_iter()
                .filter(DirectoryItem::is_dir)
                .map(|item| item.name)
                .collect(),
            Ok(ContentResponse::File(_)) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching components list");
                Vec::new()
            }
        }
    }

    /// Directory listing of one component
    pub async fn component_files(&self, component: &str) -> Vec<DirectoryItem> {
        let path = format!("{}/{}", self.components_path, component);
        match self.get_content(&path).await {
            Ok(ContentResponse::Directory(items)) => items,
            Ok(ContentResponse::File(_)) => Vec::new(),
            Err(e) => {
                tracing::error!(component, error = %e, "Error fetching component files");
                Vec::new()
            }
        }
    }

    async fn request_content(&self, path: &str) -> Result<ContentResponse, RemoteError> {
        let url = self.contents_url(path)?;
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let quota_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(RemoteError::from_response(
                status,
                message,
                quota_exhausted,
                path,
            ));
        }

        serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RemoteSource for GitHubClient {
    async fn fetch_registry_payload(&self) -> Option<Vec<u8>> {
        for path in REGISTRY_PATHS {
            match self.read_file(path).await {
                Ok(text) => {
                    tracing::info!(path, "Fetched registry from GitHub");
                    return Some(text.into_bytes());
                }
                Err(e) if e.is_rate_limited() => {
                    tracing::warn!(
                        path,
                        rate_limited = true,
                        "GitHub API rate limit exceeded while fetching registry"
                    );
                    return None;
                }
                Err(e) => {
                    tracing::debug!(path, error = %e, "Registry not available at this path");
                }
            }
        }
        tracing::warn!("Error fetching registry from GitHub: no known location answered");
        None
    }

    async fn fetch_file_content(&self, path: &str) -> String {
        match self.read_file(path).await {
            Ok(text) => text,
            Err(e) if e.is_rate_limited() => {
                tracing::warn!(
                    path,
                    rate_limited = true,
                    "GitHub API rate limit exceeded. Consider using a token."
                );
                String::new()
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "Error fetching file content");
                String::new()
            }
        }
    }
}
