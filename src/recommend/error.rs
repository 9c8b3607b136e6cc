//! Recommendation error types

use crate::github::GitHubError;
use thiserror::Error;

/// Errors surfaced by the recommendation service.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The candidate search failed; no partial list is returned
    #[error("GitHub API search failed")]
    SearchFailed(#[source] GitHubError),

    /// The GitHub client could not be constructed
    #[error("Client setup failed: {0}")]
    ClientSetup(#[source] GitHubError),

    /// Request filters were rejected before searching
    #[error("Invalid filters: {0}")]
    InvalidFilters(String),
}

impl RecommendError {
    /// True when the underlying failure is an exhausted rate-limit budget.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            RecommendError::SearchFailed(e) | RecommendError::ClientSetup(e) => e.is_rate_limited(),
            RecommendError::InvalidFilters(_) => false,
        }
    }
}

/// Convenience result alias for recommendation operations
pub type RecommendResult<T> = Result<T, RecommendError>;
