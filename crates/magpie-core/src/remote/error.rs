//! Errors raised while talking to the remote source.

use reqwest::StatusCode;

/// Error type for remote reads.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl RemoteError {
    /// Classify a non-success response.
    ///
    /// `message` is the `message` field of GitHub's JSON error body when there
    /// is one. 403 counts as a rate limit when the message says so or the
    /// remaining-quota header is zero; 429 always does.
    pub fn from_response(
        status: StatusCode,
        message: String,
        quota_exhausted: bool,
        path: &str,
    ) -> Self {
        let mentions_limit = message.to_ascii_lowercase().contains("rate limit");
        match status {
            StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited { message },
            StatusCode::FORBIDDEN if mentions_limit || quota_exhausted => {
                RemoteError::RateLimited { message }
            }
            StatusCode::NOT_FOUND => RemoteError::NotFound {
                path: path.to_string(),
            },
            _ => RemoteError::Status { status, message },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RemoteError::RateLimited { .. })
    }

    /// Whether another attempt might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Transport(_) => true,
            RemoteError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_with_rate_limit_message() {
        let err = RemoteError::from_response(
            StatusCode::FORBIDDEN,
            "API rate limit exceeded for 1.2.3.4.".to_string(),
            false,
            "components/a.tsx",
        );
        assert!(err.is_rate_limited());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_forbidden_with_exhausted_quota_header() {
        let err = RemoteError::from_response(
            StatusCode::FORBIDDEN,
            "Forbidden".to_string(),
            true,
            "x",
        );
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_plain_forbidden_is_not_rate_limit() {
        let err = RemoteError::from_response(
            StatusCode::FORBIDDEN,
            "Resource not accessible by integration".to_string(),
            false,
            "x",
        );
        assert!(!err.is_rate_limited());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_not_found() {
        let err = RemoteError::from_response(
            StatusCode::NOT_FOUND,
            "Not Found".to_string(),
            false,
            "components/missing.tsx",
        );
        assert!(matches!(err, RemoteError::NotFound { ref path } if path == "components/missing.tsx"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_server_errors_are_transient() {
        let err = RemoteError::from_response(
            StatusCode::BAD_GATEWAY,
            String::new(),
            false,
            "x",
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_too_many_requests_is_rate_limit() {
        let err = RemoteError::from_response(
            StatusCode::TOO_MANY_REQUESTS,
            "slow down".to_string(),
            false,
            "x",
        );
        assert!(err.is_rate_limited());
    }
}
