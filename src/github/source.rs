//! The capabilities the recommender consumes from GitHub.

use crate::github::error::GitHubResult;
use crate::github::models::{IssueSummary, LanguageBreakdown, SearchPage};
use crate::github::search_query::SearchOptions;
use async_trait::async_trait;

/// Read-only repository data source.
///
/// Lookups other than `search_repositories` are expected to degrade to an
/// empty/negative answer on ordinary failures. Errors are reserved for
/// conditions that make the answer meaningless, such as an exhausted
/// rate-limit budget.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn search_repositories(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> GitHubResult<SearchPage>;

    async fn get_repository_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<LanguageBreakdown>;

    async fn check_contributing_guide(&self, owner: &str, repo: &str) -> GitHubResult<bool>;

    async fn get_readme_content(&self, owner: &str, repo: &str) -> GitHubResult<Option<String>>;

    async fn get_good_first_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Vec<IssueSummary>>;
}
