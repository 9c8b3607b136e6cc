//! GitHub access layer
//!
//! Repository search, language breakdowns, README and contributing-guide
//! probes, and good-first-issue listing over the octocrab library, with
//! rate-limit tracking.

pub mod client;
pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod search_query;
pub mod source;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder, IssueListOptions};

// Re-export error types
pub use error::{GitHubError, GitHubResult};

pub use models::{IssueSummary, LanguageBreakdown, SearchPage};
pub use rate_limiter::{RateLimitResource, RateLimitStatus, RateLimiter, RateLimits};
pub use search_query::{SearchOptions, SearchOrder, SearchQueryBuilder, SearchSort};
pub use source::RepositorySource;
