//! Candidate fetching logic

use chrono::{DateTime, Months, Utc};
use futures::future::try_join_all;
use log::{debug, info};
use std::collections::HashMap;

use crate::github::{GitHubResult, RepositorySource, SearchOptions, SearchOrder, SearchSort};
use crate::recommend::config::RecommendConfig;
use crate::recommend::types::{Repository, SearchFilters};

/// Upstream query for a recommendation search.
///
/// Only the first selected language goes upstream; the rest are applied by
/// scoring. Contribution types never narrow the upstream query.
#[must_use]
pub fn build_search_query(languages: &[String], lookback_years: u32, now: DateTime<Utc>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(first) = languages.first() {
        parts.push(format!("language:{}", first.to_lowercase()));
    }

    parts.push("is:public".to_string());
    parts.push("archived:false".to_string());

    let since = now
        .checked_sub_months(Months::new(lookback_years.saturating_mul(12)))
        .unwrap_or(now);
    parts.push(format!("pushed:>={}", since.format("%Y-%m-%d")));

    parts.join(" ")
}

/// Number of upstream pages requested for `limit` results.
#[must_use]
pub fn pages_for_limit(limit: u32, config: &RecommendConfig) -> u32 {
    let per_page = u32::from(config.per_page.max(1));
    limit.div_ceil(per_page).clamp(1, config.max_pages.max(1))
}

/// The first page of results is sorted by stars, later pages by recency.
#[must_use]
pub fn sort_for_page(page: u32) -> SearchSort {
    if page == 1 {
        SearchSort::Stars
    } else {
        SearchSort::Updated
    }
}

/// Runs the page searches concurrently and merges them.
///
/// Any failed page fails the whole fetch. Returns the deduplicated
/// candidates, capped to `filters.limit`, and the first page's total count.
pub(crate) async fn fetch_candidates(
    source: &dyn RepositorySource,
    query: &str,
    filters: &SearchFilters,
    config: &RecommendConfig,
) -> GitHubResult<(Vec<Repository>, u64)> {
    let pages = pages_for_limit(filters.limit, config);
    info!(
        "Searching {pages} page(s) from page {} for query: {query}",
        filters.page
    );

    let searches = (filters.page..filters.page.saturating_add(pages)).map(|page| {
        let options = SearchOptions {
            sort: sort_for_page(page),
            order: SearchOrder::Desc,
            per_page: config.per_page,
            page,
        };
        source.search_repositories(query, options)
    });

    let results = try_join_all(searches).await?;
    let total_count = results.first().map_or(0, |p| p.total_count);

    let items = results.into_iter().flat_map(|p| p.items);
    let mut candidates = dedupe_by_id(items);
    debug!("{} unique candidates across {pages} page(s)", candidates.len());

    candidates.truncate(filters.limit as usize);
    Ok((candidates, total_count))
}

/// Removes repeated ids. The last copy's data is kept at the first copy's
/// position.
pub(crate) fn dedupe_by_id(items: impl IntoIterator<Item = Repository>) -> Vec<Repository> {
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut unique: Vec<Repository> = Vec::new();

    for repo in items {
        match positions.get(&repo.id) {
            Some(&index) => unique[index] = repo,
            None => {
                positions.insert(repo.id, unique.len());
                unique.push(repo);
            }
        }
    }
    unique
}
