//! Rate limiting support
//!
//! GitHub meters search calls and all other REST calls from separate pools,
//! so each pool gets its own [`RateLimiter`].

use crate::github::error::{GitHubError, GitHubResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hourly budget of the core pool for an authenticated token.
const CORE_BUDGET: u32 = 5000;

/// Per-minute budget of the search pool for an authenticated token.
const SEARCH_BUDGET: u32 = 30;

/// Longest wait accepted before giving up on a depleted budget.
const MAX_WAIT: Duration = Duration::from_secs(300);

/// A GitHub rate-limit pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitResource {
    /// Contents, languages, issues and other non-search calls
    Core,
    /// Search endpoints
    Search,
}

impl RateLimitResource {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Search => "search",
        }
    }
}

/// Snapshot of the tracked rate-limit budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub reset: DateTime<Utc>,
}

/// Tracks the remaining budget of one pool between calls.
#[derive(Debug)]
pub struct RateLimiter {
    remaining: u32,
    reset_time: DateTime<Utc>,
    budget: u32,
    window: chrono::Duration,
}

impl RateLimiter {
    /// Tracker for the core pool: 5000 calls per hour.
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(CORE_BUDGET, chrono::Duration::hours(1))
    }

    /// Tracker that assumes `budget` calls per `window` until told otherwise.
    #[must_use]
    pub fn with_budget(budget: u32, window: chrono::Duration) -> Self {
        Self {
            remaining: budget,
            reset_time: Utc::now() + window,
            budget,
            window,
        }
    }

    pub fn update(&mut self, remaining: u32, reset_time: DateTime<Utc>) {
        self.remaining = remaining;
        self.reset_time = reset_time;
    }

    #[must_use]
    pub fn status(&self) -> RateLimitStatus {
        RateLimitStatus {
            remaining: self.remaining,
            reset: self.reset_time,
        }
    }

    #[must_use]
    pub fn can_make_request(&self) -> bool {
        self.remaining > 0 || Utc::now() > self.reset_time
    }

    pub fn check_and_reset_if_expired(&mut self) {
        // Past the reset time GitHub has refilled the budget
        if Utc::now() > self.reset_time {
            self.remaining = self.budget;
            self.reset_time = Utc::now() + self.window;
        }
    }

    /// Fails fast when the budget is spent.
    pub fn ensure_available(&mut self) -> GitHubResult<()> {
        self.check_and_reset_if_expired();
        if self.can_make_request() {
            Ok(())
        } else {
            Err(GitHubError::RateLimitExceeded {
                remaining: self.remaining,
                reset_time: self.reset_time,
            })
        }
    }

    /// How long to pause before the next call, if at all.
    ///
    /// Returns an error when the budget is within `buffer` and the reset is
    /// further away than we are willing to wait.
    pub fn required_wait(&self, buffer: u32) -> GitHubResult<Option<Duration>> {
        if self.remaining > buffer || Utc::now() >= self.reset_time {
            return Ok(None);
        }

        let wait_time = (self.reset_time - Utc::now())
            .to_std()
            .unwrap_or(Duration::from_secs(60));

        if wait_time > MAX_WAIT {
            return Err(GitHubError::RateLimitExceeded {
                remaining: self.remaining,
                reset_time: self.reset_time,
            });
        }

        Ok(Some(wait_time))
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// One tracker per pool.
#[derive(Debug)]
pub struct RateLimits {
    core: RateLimiter,
    search: RateLimiter,
}

impl RateLimits {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: RateLimiter::with_budget(CORE_BUDGET, chrono::Duration::hours(1)),
            search: RateLimiter::with_budget(SEARCH_BUDGET, chrono::Duration::minutes(1)),
        }
    }

    #[must_use]
    pub fn limiter(&self, resource: RateLimitResource) -> &RateLimiter {
        match resource {
            RateLimitResource::Core => &self.core,
            RateLimitResource::Search => &self.search,
        }
    }

    pub fn limiter_mut(&mut self, resource: RateLimitResource) -> &mut RateLimiter {
        match resource {
            RateLimitResource::Core => &mut self.core,
            RateLimitResource::Search => &mut self.search,
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::new()
    }
}
