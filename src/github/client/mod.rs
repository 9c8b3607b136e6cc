//! GitHub API client wrapper
//!
//! Provides the repository, content, language and issue lookups the
//! recommender needs without exposing Octocrab to callers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use contrib_finder::github::{GitHubClient, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let page = gh
//!         .search_repositories("language:rust is:public", SearchOptions::default())
//!         .await?;
//!     println!("{} matches", page.total_count);
//!
//!     Ok(())
//! }
//! ```

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::rate_limiter::{RateLimitResource, RateLimitStatus, RateLimits};
use chrono::{DateTime, Utc};
use log::{debug, info};
use octocrab::Octocrab;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

mod issues;
mod repositories;
mod source;

pub use issues::{GOOD_FIRST_ISSUE_LABELS, IssueListOptions};
pub use repositories::{CONTRIBUTING_GUIDE_PATHS, README_PATHS};

/// Default per-call timeout for GitHub API requests.
const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Remaining search budget below which calls start waiting for the reset.
const DEFAULT_RATE_LIMIT_BUFFER: u32 = 10;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone); clones share the rate-limit trackers.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    rate_limits: Arc<RwLock<RateLimits>>,
    api_timeout: Duration,
    rate_limit_buffer: u32,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Last known budget of one rate-limit pool.
    pub async fn rate_limit_status(&self, resource: RateLimitResource) -> RateLimitStatus {
        self.rate_limits.read().await.limiter(resource).status()
    }

    /// Fails fast when the tracked core budget is spent.
    pub(crate) async fn ensure_core_budget(&self) -> GitHubResult<()> {
        self.rate_limits
            .write()
            .await
            .limiter_mut(RateLimitResource::Core)
            .ensure_available()
    }

    /// Search-pool check that waits out a nearly spent budget when the
    /// reset is close.
    pub(crate) async fn ensure_search_budget(&self) -> GitHubResult<()> {
        let wait = {
            let mut limits = self.rate_limits.write().await;
            let limiter = limits.limiter_mut(RateLimitResource::Search);
            limiter.ensure_available()?;
            limiter.required_wait(self.rate_limit_buffer)?
        };

        if let Some(wait_time) = wait {
            info!("Search rate limit approaching, waiting {wait_time:?}");
            tokio::time::sleep(wait_time).await;
        }
        Ok(())
    }

    /// Refresh both trackers from the rate-limit endpoint, returning the
    /// remaining search budget.
    pub(crate) async fn refresh_rate_limit(&self) -> u32 {
        match self.inner.ratelimit().get().await {
            Ok(rate_limit) => {
                let search = &rate_limit.resources.search;
                let core = &rate_limit.resources.core;

                let mut limits = self.rate_limits.write().await;
                limits
                    .limiter_mut(RateLimitResource::Search)
                    .update(search.remaining as u32, reset_from_timestamp(search.reset));
                limits
                    .limiter_mut(RateLimitResource::Core)
                    .update(core.remaining as u32, reset_from_timestamp(core.reset));
                search.remaining as u32
            }
            Err(e) => {
                debug!("Rate limit refresh failed: {e}");
                self.rate_limits
                    .read()
                    .await
                    .limiter(RateLimitResource::Search)
                    .status()
                    .remaining
            }
        }
    }

    /// Run an upstream call under the configured timeout.
    pub(crate) async fn timed<T, F>(&self, operation: &str, call: F) -> GitHubResult<T>
    where
        F: Future<Output = Result<T, octocrab::Error>>,
    {
        tokio::time::timeout(self.api_timeout, call)
            .await
            .map_err(|_| GitHubError::Timeout {
                operation: operation.to_string(),
                duration: self.api_timeout,
            })?
            .map_err(GitHubError::from)
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
    api_timeout: Duration,
    rate_limit_buffer: u32,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
            api_timeout: DEFAULT_API_TIMEOUT,
            rate_limit_buffer: DEFAULT_RATE_LIMIT_BUFFER,
        }
    }

    /// Set personal access token for authentication
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set base URI (for GitHub Enterprise)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Per-call timeout for upstream requests
    #[must_use]
    pub fn api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    /// Remaining search budget at which searches start waiting for the reset
    #[must_use]
    pub fn rate_limit_buffer(mut self, buffer: u32) -> Self {
        self.rate_limit_buffer = buffer;
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
            rate_limits: Arc::new(RwLock::new(RateLimits::new())),
            api_timeout: self.api_timeout,
            rate_limit_buffer: self.rate_limit_buffer,
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn reset_from_timestamp(timestamp: u64) -> DateTime<Utc> {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1))
}
