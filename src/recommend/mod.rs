//! Repository recommendation
//!
//! Finds open-source repositories worth contributing to: searches GitHub for
//! candidates, enriches them with language, README and issue data in paced
//! batches, scores them and returns a ranked page.

mod config;
mod convenience;
mod enrich;
mod error;
mod fetch;

pub mod contribution_types;
pub mod filter;
pub mod readme;
pub mod scoring;
pub mod types;

pub use config::{RecommendConfig, resolve_token};
pub use contribution_types::{
    CONTRIBUTION_TYPES, ContributionType, Language, POPULAR_LANGUAGES, contribution_type,
};
pub use convenience::{recommend_repositories, recommend_repositories_with_config};
pub use error::{RecommendError, RecommendResult};
pub use fetch::{build_search_query, pages_for_limit, sort_for_page};
pub use filter::{
    RepositoryStats, extract_languages, filter_repositories, filter_repositories_at,
    passes_quality_checks, repository_stats, sort_by_relevance,
};
pub use scoring::{ProjectMaturity, RepositoryScore, ScoreWeights, ScoringInput, score_repository};
pub use types::{
    ReadmeAnalysis, Repository, RepositoryLicense, SearchFilters, SearchMode, SearchResponse,
    UserLanguageSettings,
};

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::github::{GitHubClient, RepositorySource};
use enrich::enrich_all;
use fetch::fetch_candidates;
use filter::compare_relevance;

/// Search/scoring service over a [`RepositorySource`].
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent searches.
#[derive(Clone)]
pub struct RepositorySearchService {
    source: Arc<dyn RepositorySource>,
    config: RecommendConfig,
}

impl RepositorySearchService {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self::with_config(source, RecommendConfig::default())
    }

    pub fn with_config(source: Arc<dyn RepositorySource>, config: RecommendConfig) -> Self {
        Self { source, config }
    }

    /// Service backed by a [`GitHubClient`].
    ///
    /// `token` wins over `GITHUB_TOKEN`; without either the client is
    /// unauthenticated and gets GitHub's much smaller rate limit.
    pub fn from_token(token: Option<&str>, config: RecommendConfig) -> RecommendResult<Self> {
        let mut builder = GitHubClient::builder()
            .api_timeout(config.api_timeout)
            .rate_limit_buffer(config.rate_limit_buffer);

        match resolve_token(token) {
            Some(token) => builder = builder.personal_token(token),
            None => warn!("No GitHub token available, using unauthenticated requests"),
        }

        let client = builder.build().map_err(RecommendError::ClientSetup)?;
        Ok(Self::with_config(Arc::new(client), config))
    }

    #[must_use]
    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Ranked repositories matching `filters`.
    ///
    /// Fails only when the candidate search itself fails; enrichment
    /// failures degrade individual repositories to a basic score.
    pub async fn search_repositories(
        &self,
        filters: &SearchFilters,
        settings: Option<&UserLanguageSettings>,
    ) -> RecommendResult<SearchResponse> {
        self.search_repositories_at(filters, settings, Utc::now())
            .await
    }

    /// [`Self::search_repositories`] evaluated against a fixed clock.
    pub async fn search_repositories_at(
        &self,
        filters: &SearchFilters,
        settings: Option<&UserLanguageSettings>,
        now: DateTime<Utc>,
    ) -> RecommendResult<SearchResponse> {
        let query = build_search_query(&filters.languages, self.config.lookback_years, now);

        let (candidates, total_count) =
            fetch_candidates(self.source.as_ref(), &query, filters, &self.config)
                .await
                .map_err(|e| {
                    warn!("Repository search failed: {e}");
                    RecommendError::SearchFailed(e)
                })?;

        let enriched = enrich_all(self.source.as_ref(), candidates, &self.config, now).await;

        let mut ranked: Vec<Repository> = enriched
            .into_iter()
            .filter(|e| settings.is_none_or(|s| s.allows(&e.repo)))
            .map(|e| {
                let score = e.fallback_score.unwrap_or_else(|| {
                    let input = ScoringInput {
                        repo: &e.repo,
                        selected_languages: &filters.languages,
                        contribution_types: &filters.contribution_types,
                    };
                    score_repository(input, now).total
                });
                Repository {
                    score: Some(score),
                    ..e.repo
                }
            })
            .filter(|r| r.score.is_some_and(|s| s > self.config.min_score))
            .collect();

        ranked.sort_by(compare_relevance);
        ranked.truncate(filters.limit as usize);

        info!(
            "Returning {} repositories (upstream total {total_count})",
            ranked.len()
        );

        Ok(SearchResponse {
            repositories: ranked,
            total_count,
            page: filters.page,
        })
    }
}
