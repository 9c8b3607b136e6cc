//! Tests for the static catalogs, request validation and configuration.

use contrib_finder::recommend::types::MAX_LIMIT;
use contrib_finder::recommend::{CONTRIBUTION_TYPES, POPULAR_LANGUAGES, contribution_type};
use contrib_finder::{
    RecommendConfig, RecommendError, SearchFilters, SearchResponse, is_open_source_license,
    license_info,
};
use std::time::Duration;

#[test]
fn test_contribution_type_catalog() {
    let ids: Vec<&str> = CONTRIBUTION_TYPES.iter().map(|t| t.id).collect();
    assert_eq!(
        ids,
        [
            "documentation",
            "translation",
            "bug-fix",
            "feature",
            "testing",
            "refactoring",
            "good-first-issue"
        ]
    );

    let docs = contribution_type("documentation").unwrap();
    assert!(docs.matches_text("see the project wiki"));
    assert!(!docs.matches_text("fast json parser"));
    assert!(contribution_type("gardening").is_none());
}

#[test]
fn test_popular_languages_have_colors() {
    assert_eq!(POPULAR_LANGUAGES.len(), 16);
    assert!(POPULAR_LANGUAGES.iter().any(|l| l.name == "Rust"));
    assert!(POPULAR_LANGUAGES.iter().all(|l| l.color.starts_with('#')));
}

#[test]
fn test_license_catalog() {
    assert!(is_open_source_license(Some("MIT")));
    assert!(is_open_source_license(Some("apache-2.0")));
    assert!(!is_open_source_license(Some("Proprietary")));
    assert!(!is_open_source_license(None));

    let mit = license_info(Some("mit")).unwrap();
    assert_eq!(mit.name, "MIT License");
    assert_eq!(mit.url, "https://opensource.org/licenses/MIT");

    let other = license_info(Some("WTFPL")).unwrap();
    assert_eq!(other.name, "WTFPL");
    assert_eq!(other.description, "Other open-source license");
    assert!(other.url.is_empty());

    assert!(license_info(None).is_none());
}

#[test]
fn test_filters_validation() {
    assert!(SearchFilters::new(["Rust"], ["testing"]).validate().is_ok());

    let err = SearchFilters::new(Vec::<String>::new(), ["testing"])
        .validate()
        .unwrap_err();
    assert!(matches!(err, RecommendError::InvalidFilters(_)));
    assert!(err.to_string().contains("At least one language must be selected"));

    assert!(
        SearchFilters::new(["Rust"], Vec::<String>::new())
            .validate()
            .is_err()
    );
    assert!(
        SearchFilters::new(["Rust"], ["testing"])
            .with_page(0)
            .validate()
            .is_err()
    );
    assert!(
        SearchFilters::new(["Rust"], ["testing"])
            .with_limit(MAX_LIMIT + 1)
            .validate()
            .is_err()
    );
}

#[test]
fn test_filters_deserialize_with_defaults() {
    let filters: SearchFilters = serde_json::from_str(
        r#"{"languages":["Go"],"contributionTypes":["bug-fix"]}"#,
    )
    .unwrap();
    assert_eq!(filters.page, 1);
    assert_eq!(filters.limit, 30);
    assert_eq!(filters.contribution_types, ["bug-fix"]);
}

#[test]
fn test_response_serializes_camel_case() {
    let response = SearchResponse {
        repositories: Vec::new(),
        total_count: 42,
        page: 2,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["totalCount"], 42);
    assert_eq!(json["page"], 2);
}

#[test]
fn test_config_defaults() {
    let config = RecommendConfig::default();
    assert_eq!(config.per_page, 30);
    assert_eq!(config.max_pages, 3);
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.batch_delay, Duration::from_millis(100));
    assert_eq!(config.min_score, 0.05);
    assert_eq!(config.lookback_years, 2);
}

#[test]
fn test_explicit_token_wins() {
    assert_eq!(
        contrib_finder::recommend::resolve_token(Some("  ghp_example  ")),
        Some("ghp_example".to_string())
    );
}
