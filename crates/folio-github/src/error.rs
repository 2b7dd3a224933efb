//! Errors raised while talking to GitHub

use folio_common::FolioError;
use thiserror::Error;

/// Result alias for repository operations
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Failures of the repository source
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The API answered with a non-success status
    #[error("GitHub API error: {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not what the API documents
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API base cannot carry the request path
    #[error("Invalid GitHub API URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for GitHubError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<GitHubError> for FolioError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Status(code) => FolioError::github_with_status(format!("GitHub API error: {code}"), code),
            GitHubError::Request(e) => FolioError::network_with_source("GitHub request failed", e),
            GitHubError::Decode(e) => FolioError::Serialization(e),
            GitHubError::InvalidUrl(message) => FolioError::config(message),
        }
    }
}
