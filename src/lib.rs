//! `contrib_finder` - open-source contribution recommendations via Octocrab
//!
//! This library searches GitHub for repositories that match a developer's
//! languages and preferred kinds of contribution, enriches each candidate with
//! language, README and issue data, and ranks them with a rule-based score.

// Module declarations
pub mod github;
pub mod license;
pub mod recommend;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder, RepositorySource};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export search parameter types
pub use github::{SearchOptions, SearchOrder, SearchQueryBuilder, SearchSort};

// Re-export recommendation types and entry points
pub use recommend::{
    ReadmeAnalysis, RecommendConfig, RecommendError, RecommendResult, Repository,
    RepositorySearchService, SearchFilters, SearchMode, SearchResponse, UserLanguageSettings,
    recommend_repositories, recommend_repositories_with_config,
};

pub use license::{LicenseInfo, is_open_source_license, license_info};
