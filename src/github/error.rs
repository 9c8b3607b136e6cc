//! GitHub API error types

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Error types for GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Generic GitHub API error
    #[error("GitHub API error: {0}")]
    Api(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Local rate-limit budget is exhausted
    #[error("Rate limit exceeded. Remaining: {remaining}, Reset time: {reset_time}")]
    RateLimitExceeded {
        remaining: u32,
        reset_time: DateTime<Utc>,
    },

    /// Upstream call did not answer in time
    #[error("Operation timed out: {operation} after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl GitHubError {
    /// True when GitHub answered 404 for the requested resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            GitHubError::NotFound(_) => true,
            GitHubError::Octocrab(octocrab::Error::GitHub { source, .. }) => {
                source.status_code.as_u16() == 404
            }
            _ => false,
        }
    }

    /// True for errors that make further calls pointless until the budget resets.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GitHubError::RateLimitExceeded { .. } => true,
            GitHubError::Octocrab(octocrab::Error::GitHub { source, .. }) => {
                source.status_code.as_u16() == 429
                    || source.message.to_lowercase().contains("rate limit")
            }
            _ => false,
        }
    }
}

impl From<String> for GitHubError {
    fn from(s: String) -> Self {
        GitHubError::Api(s)
    }
}

impl From<&str> for GitHubError {
    fn from(s: &str) -> Self {
        GitHubError::Api(s.to_string())
    }
}
