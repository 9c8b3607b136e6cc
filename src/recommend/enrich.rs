//! Per-repository enrichment in paced batches

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};

use crate::github::{GitHubResult, RepositorySource};
use crate::recommend::config::RecommendConfig;
use crate::recommend::readme;
use crate::recommend::scoring::basic_score;
use crate::recommend::types::Repository;

/// A candidate after enrichment.
#[derive(Debug, Clone)]
pub(crate) struct EnrichedRepository {
    pub repo: Repository,
    /// Set when enrichment failed and the repository was scored from its
    /// search-result fields alone
    pub fallback_score: Option<f64>,
}

/// Enrich every candidate, `batch_size` at a time, pausing between batches.
///
/// A failing repository never affects its siblings; it degrades to the
/// basic score instead.
pub(crate) async fn enrich_all(
    source: &dyn RepositorySource,
    repos: Vec<Repository>,
    config: &RecommendConfig,
    now: DateTime<Utc>,
) -> Vec<EnrichedRepository> {
    let batch_size = config.batch_size.max(1);
    let batch_count = repos.len().div_ceil(batch_size);
    let mut enriched = Vec::with_capacity(repos.len());

    for (index, batch) in repos.chunks(batch_size).enumerate() {
        if index > 0 {
            tokio::time::sleep(config.batch_delay).await;
        }
        debug!("Enriching batch {}/{batch_count}", index + 1);

        let results = join_all(batch.iter().cloned().map(|repo| async move {
            match enrich_repository(source, &repo).await {
                Ok(full) => EnrichedRepository {
                    repo: full,
                    fallback_score: None,
                },
                Err(e) => {
                    warn!("Failed to enrich repository {}: {e}", repo.full_name);
                    degrade(repo, now)
                }
            }
        }))
        .await;

        enriched.extend(results);
    }

    enriched
}

/// Fetch languages, contributing guide, good first issues and README
/// concurrently, and analyze the README when one was found.
pub(crate) async fn enrich_repository(
    source: &dyn RepositorySource,
    repo: &Repository,
) -> GitHubResult<Repository> {
    let (owner, name) = repo.owner_and_name();

    let (languages, has_contributing_guide, good_first_issues, readme_text) = futures::try_join!(
        source.get_repository_languages(owner, name),
        source.check_contributing_guide(owner, name),
        source.get_good_first_issues(owner, name),
        source.get_readme_content(owner, name),
    )?;

    let readme_analysis = readme_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| readme::analyze(Some(text)));

    Ok(Repository {
        languages,
        has_contributing_guide,
        good_first_issues_count: u32::try_from(good_first_issues.len()).unwrap_or(u32::MAX),
        readme_analysis,
        ..repo.clone()
    })
}

fn degrade(repo: Repository, now: DateTime<Utc>) -> EnrichedRepository {
    let fallback = basic_score(&repo, now);
    EnrichedRepository {
        repo: Repository {
            languages: Default::default(),
            has_contributing_guide: false,
            good_first_issues_count: 0,
            readme_analysis: None,
            ..repo
        },
        fallback_score: Some(fallback),
    }
}
