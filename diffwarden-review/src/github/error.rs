//! Typed error type for GitHub API calls.

use thiserror::Error;

/// Error type for all GitHub API operations.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Network or connection failure.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    /// 401 -- token missing, invalid or revoked.
    #[error("authentication failed: {0}")]
    Unauthorized(String),
    /// 404 -- repository or pull request not found, or not visible to the token.
    #[error("not found: {0}")]
    NotFound(String),
    /// Other API error with status code and body.
    #[error("GitHub API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        body: String,
    },
    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for GitHubError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = GitHubError::Api {
            status: 422,
            body: "Validation Failed".to_string(),
        };
        assert_eq!(error.to_string(), "GitHub API error (422): Validation Failed");
    }

    #[test]
    fn test_json_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = GitHubError::from(source);
        assert!(matches!(error, GitHubError::Json(_)));
    }
}
