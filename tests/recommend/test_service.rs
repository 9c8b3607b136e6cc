//! Tests for the search/scoring service against an in-memory source.

use super::support::{MockSource, WELCOMING_README, now, repo};
use contrib_finder::github::SearchSort;
use contrib_finder::recommend::scoring::basic_score;
use contrib_finder::{
    RecommendConfig, RecommendError, Repository, RepositorySearchService, SearchFilters,
    SearchMode, UserLanguageSettings,
};
use std::sync::Arc;
use std::time::Duration;

fn quick_config() -> RecommendConfig {
    RecommendConfig {
        batch_delay: Duration::ZERO,
        ..RecommendConfig::default()
    }
}

fn service(source: &Arc<MockSource>) -> RepositorySearchService {
    RepositorySearchService::with_config(source.clone(), quick_config())
}

fn candidates(count: u64) -> Vec<Repository> {
    (1..=count).map(|id| repo(id, &format!("org/repo-{id}"))).collect()
}

fn assert_ranked(repos: &[Repository]) {
    for pair in repos.windows(2) {
        assert!(pair[0].score >= pair[1].score, "{:?} before {:?}", pair[0].score, pair[1].score);
    }
    for r in repos {
        let score = r.score.expect("every returned repository is scored");
        assert!((0.0..=1.0).contains(&score));
        assert!(score > 0.05);
    }
}

#[tokio::test]
async fn test_query_uses_first_language_only() {
    let source = Arc::new(MockSource::default().with_page(1, 1, candidates(1)));
    let filters = SearchFilters::new(["TypeScript", "Rust"], ["documentation"]);

    service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    let queries = source.recorded_queries();
    assert_eq!(
        queries,
        vec!["language:typescript is:public archived:false pushed:>=2023-06-01".to_string()]
    );
}

#[tokio::test]
async fn test_page_fan_out_and_sort_strategy() {
    let source = Arc::new(MockSource::default());
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(100);
    service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    let calls = source.recorded_searches();
    let pages: Vec<u32> = calls.iter().map(|o| o.page).collect();
    let sorts: Vec<SearchSort> = calls.iter().map(|o| o.sort).collect();
    assert_eq!(pages, [1, 2, 3]);
    assert_eq!(sorts, [SearchSort::Stars, SearchSort::Updated, SearchSort::Updated]);
    assert!(calls.iter().all(|o| o.per_page == 30));

    let source = Arc::new(MockSource::default());
    let filters = SearchFilters::new(["Rust"], ["bug-fix"])
        .with_page(2)
        .with_limit(31);
    service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    let calls = source.recorded_searches();
    let pages: Vec<u32> = calls.iter().map(|o| o.page).collect();
    assert_eq!(pages, [2, 3]);
    assert!(calls.iter().all(|o| o.sort == SearchSort::Updated));
}

#[tokio::test]
async fn test_search_failure_is_fatal() {
    let source = Arc::new(MockSource {
        fail_search: true,
        ..MockSource::default()
    });
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]);

    let err = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::SearchFailed(_)));
    assert_eq!(err.to_string(), "GitHub API search failed");
}

#[tokio::test]
async fn test_enrichment_outage_still_returns_results() {
    let items = candidates(4);
    let expected: Vec<f64> = items.iter().map(|r| basic_score(r, now())).collect();
    let source = Arc::new(MockSource {
        fail_enrichment: true,
        ..MockSource::default()
    }
    .with_page(1, 4, items));
    let filters = SearchFilters::new(["Rust"], ["documentation"]);

    let response = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    assert_eq!(response.repositories.len(), 4);
    assert_ranked(&response.repositories);
    for r in &response.repositories {
        assert_eq!(r.score, Some(expected[(r.id - 1) as usize]));
        assert!(r.readme_analysis.is_none());
        assert!(!r.has_contributing_guide);
    }
}

#[tokio::test]
async fn test_one_failing_repository_does_not_affect_siblings() {
    let mut source = MockSource {
        failing_repos: vec!["org/repo-2".to_string()],
        ..MockSource::default()
    }
    .with_page(1, 3, candidates(3));
    for name in ["org/repo-1", "org/repo-2", "org/repo-3"] {
        source.contributing.push(name.to_string());
        source.readmes.insert(name.to_string(), WELCOMING_README.to_string());
    }
    let source = Arc::new(source);
    let filters = SearchFilters::new(["Rust"], ["documentation"]);

    let response = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    assert_eq!(response.repositories.len(), 3);
    for r in &response.repositories {
        if r.full_name == "org/repo-2" {
            assert!(!r.has_contributing_guide);
            assert!(r.readme_analysis.is_none());
        } else {
            assert!(r.has_contributing_guide);
            assert!(r.readme_analysis.as_ref().is_some_and(|a| a.is_contribution_friendly));
        }
    }
}

#[tokio::test]
async fn test_duplicates_across_pages_are_merged() {
    let first = candidates(2);
    let mut again = repo(2, "org/repo-2");
    again.stargazers_count = 777;
    let second = vec![again, repo(3, "org/repo-3")];

    let source = Arc::new(
        MockSource::default()
            .with_page(1, 250, first)
            .with_page(2, 999, second),
    );
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(60);

    let response = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    assert_eq!(response.total_count, 250);
    assert_eq!(response.page, 1);
    assert_eq!(response.repositories.len(), 3);
    let merged = response
        .repositories
        .iter()
        .find(|r| r.id == 2)
        .expect("id 2 present once");
    assert_eq!(merged.stargazers_count, 777);
}

#[tokio::test]
async fn test_candidates_capped_to_limit() {
    let source = Arc::new(MockSource::default().with_page(1, 500, candidates(30)));
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(7);

    let response = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    assert_eq!(response.repositories.len(), 7);
    assert_eq!(response.total_count, 500);
    assert_ranked(&response.repositories);
}

#[tokio::test]
async fn test_results_ranked_by_score() {
    let mut items = candidates(6);
    items[0].updated_at = now() - chrono::Duration::days(500);
    items[1].description = Some("Documentation and docs tooling".to_string());
    items[2].stargazers_count = 3;
    items[2].created_at = now() - chrono::Duration::days(30);

    let mut source = MockSource::default().with_page(1, 6, items);
    source.contributing.push("org/repo-4".to_string());
    source.good_first_issues.insert("org/repo-5".to_string(), 3);
    source
        .readmes
        .insert("org/repo-6".to_string(), WELCOMING_README.to_string());
    let source = Arc::new(source);

    let filters = SearchFilters::new(["Rust"], ["documentation", "good-first-issue"]);
    let response = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();

    assert!(!response.repositories.is_empty());
    assert_ranked(&response.repositories);
}

#[tokio::test]
async fn test_exclude_language_settings() {
    let mut source = MockSource::default().with_page(1, 3, candidates(3));
    source.languages.insert(
        "org/repo-2".to_string(),
        [("TypeScript".to_string(), 1000_u64)].into_iter().collect(),
    );
    let source = Arc::new(source);

    let filters = SearchFilters::new(["Rust"], ["bug-fix"]);
    let settings = UserLanguageSettings {
        search_mode: SearchMode::Exclude,
        included_languages: Vec::new(),
        excluded_languages: vec!["typescript".to_string()],
    };

    let response = service(&source)
        .search_repositories_at(&filters, Some(&settings), now())
        .await
        .unwrap();

    let ids: Vec<u64> = response.repositories.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&2));
}

#[tokio::test]
async fn test_include_language_settings() {
    let mut source = MockSource::default().with_page(1, 3, candidates(3));
    source.languages.insert(
        "org/repo-3".to_string(),
        [("Zig".to_string(), 10_u64)].into_iter().collect(),
    );
    let source = Arc::new(source);
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]);

    let only_zig = UserLanguageSettings {
        search_mode: SearchMode::Include,
        included_languages: vec!["ZIG".to_string()],
        excluded_languages: Vec::new(),
    };
    let response = service(&source)
        .search_repositories_at(&filters, Some(&only_zig), now())
        .await
        .unwrap();
    let ids: Vec<u64> = response.repositories.iter().map(|r| r.id).collect();
    assert_eq!(ids, [3]);

    let empty_include = UserLanguageSettings::default();
    let response = service(&source)
        .search_repositories_at(&filters, Some(&empty_include), now())
        .await
        .unwrap();
    assert_eq!(response.repositories.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_batches_are_paced() {
    let source = Arc::new(MockSource::default().with_page(1, 11, candidates(11)));
    let service = RepositorySearchService::with_config(source.clone(), RecommendConfig::default());
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(11);

    let started = tokio::time::Instant::now();
    let response = service
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.repositories.len(), 11);
    // Three batches of at most five, two pauses of 100ms
    assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(300), "{elapsed:?}");
}

#[tokio::test]
async fn test_one_failing_page_fails_the_search() {
    let source = Arc::new(
        MockSource {
            failing_pages: vec![2],
            ..MockSource::default()
        }
        .with_page(1, 90, candidates(30))
        .with_page(3, 90, candidates(3)),
    );
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(90);

    let err = service(&source)
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::SearchFailed(_)));
    let pages: Vec<u32> = source.recorded_searches().iter().map(|o| o.page).collect();
    assert!(pages.contains(&2));
}

#[tokio::test(start_paused = true)]
async fn test_repositories_in_a_batch_are_enriched_concurrently() {
    let source = Arc::new(
        MockSource {
            lookup_delay: Some(Duration::from_secs(1)),
            ..MockSource::default()
        }
        .with_page(1, 11, candidates(11)),
    );
    let service = RepositorySearchService::with_config(source.clone(), RecommendConfig::default());
    let filters = SearchFilters::new(["Rust"], ["bug-fix"]).with_limit(11);

    let started = tokio::time::Instant::now();
    let response = service
        .search_repositories_at(&filters, None, now())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.repositories.len(), 11);
    assert_eq!(source.max_concurrent_lookups(), 5);
    // One lookup delay per batch plus two 100ms pauses, not one per repository
    assert!(elapsed >= Duration::from_millis(3200), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "{elapsed:?}");
}
