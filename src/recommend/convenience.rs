//! Convenience wrapper functions for recommendation searches

use super::{
    RecommendConfig, RecommendResult, RepositorySearchService, SearchFilters, SearchResponse,
    UserLanguageSettings,
};

/// Recommend repositories with a single function call.
///
/// Validates `filters`, builds a GitHub-backed service and runs one search.
///
/// # Arguments
///
/// * `token` - GitHub personal access token; `None` falls back to `GITHUB_TOKEN`
/// * `filters` - Languages, contribution types and paging
/// * `settings` - Optional include/exclude language preferences
///
/// # Example
///
/// ```rust,no_run
/// use contrib_finder::{recommend_repositories, SearchFilters};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let filters = SearchFilters::new(["Rust"], ["documentation", "good-first-issue"]);
///
///     let response = recommend_repositories(None, filters, None).await?;
///
///     for repo in &response.repositories {
///         println!("{} ({:.2})", repo.full_name, repo.score.unwrap_or_default());
///     }
///
///     Ok(())
/// }
/// ```
pub async fn recommend_repositories(
    token: Option<&str>,
    filters: SearchFilters,
    settings: Option<UserLanguageSettings>,
) -> RecommendResult<SearchResponse> {
    recommend_repositories_with_config(token, filters, settings, RecommendConfig::from_env()).await
}

/// Like [`recommend_repositories`] with an explicit [`RecommendConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use contrib_finder::{recommend_repositories_with_config, RecommendConfig, SearchFilters};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("GITHUB_TOKEN")?;
///     let filters = SearchFilters::new(["Go"], ["testing"]).with_limit(10);
///
///     let config = RecommendConfig {
///         batch_size: 2,
///         batch_delay: Duration::from_millis(250),
///         ..Default::default()
///     };
///
///     let response =
///         recommend_repositories_with_config(Some(&token), filters, None, config).await?;
///     println!("{} upstream matches", response.total_count);
///
///     Ok(())
/// }
/// ```
pub async fn recommend_repositories_with_config(
    token: Option<&str>,
    filters: SearchFilters,
    settings: Option<UserLanguageSettings>,
    config: RecommendConfig,
) -> RecommendResult<SearchResponse> {
    filters.validate()?;
    let service = RepositorySearchService::from_token(token, config)?;
    service
        .search_repositories(&filters, settings.as_ref())
        .await
}
