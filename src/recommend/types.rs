//! Data model shared by the analyzer, filter and search service.

use crate::github::LanguageBreakdown;
use crate::recommend::error::{RecommendError, RecommendResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default result page.
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of repositories per response.
pub const DEFAULT_LIMIT: u32 = 30;

/// Largest accepted `limit`.
pub const MAX_LIMIT: u32 = 100;

/// License as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLicense {
    pub key: String,
    pub name: String,
}

/// A candidate repository.
///
/// Built from a search result item; the enrichment fields
/// (`languages`, `has_contributing_guide`, `good_first_issues_count`,
/// `readme_analysis`, `score`) are filled in once by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub languages: LanguageBreakdown,
    #[serde(default)]
    pub topics: Vec<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub open_issues_count: u32,
    pub has_issues: bool,
    pub archived: Option<bool>,
    pub disabled: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub license: Option<RepositoryLicense>,
    #[serde(default)]
    pub has_contributing_guide: bool,
    #[serde(default)]
    pub good_first_issues_count: u32,
    #[serde(default)]
    pub readme_analysis: Option<ReadmeAnalysis>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Repository {
    /// Owner and name, split from `full_name` when it has the usual shape.
    #[must_use]
    pub fn owner_and_name(&self) -> (&str, &str) {
        match self.full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => (owner, name),
            _ => (self.owner.as_str(), self.name.as_str()),
        }
    }

    /// Primary language plus every language in the breakdown, lowercased.
    pub fn language_set(&self) -> impl Iterator<Item = String> + '_ {
        self.language
            .iter()
            .chain(self.languages.keys())
            .map(|l| l.to_lowercase())
    }
}

/// Result of analyzing README text for contribution friendliness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeAnalysis {
    pub is_contribution_friendly: bool,
    pub contribution_score: f64,
    /// Heuristics that fired, in evaluation order
    pub reasons: Vec<String>,
    /// Inferred contribution type ids, without duplicates
    pub contribution_types: Vec<String>,
    pub has_contributing_section: bool,
    pub has_issues_section: bool,
    pub has_license: bool,
    /// Set when the README turns contributors away; pins friendliness to false
    #[serde(default)]
    pub contributions_discouraged: bool,
}

impl ReadmeAnalysis {
    /// Add `delta` to the score, clamp to [0, 1] and re-derive friendliness.
    pub fn adjust_score(&mut self, delta: f64) {
        self.set_score(self.contribution_score + delta);
    }

    pub fn set_score(&mut self, score: f64) {
        self.contribution_score = score.clamp(0.0, 1.0);
        self.is_contribution_friendly =
            !self.contributions_discouraged && self.contribution_score > 0.3;
    }

    /// Mark the README as discouraging contributions.
    pub fn discourage(&mut self) {
        self.contributions_discouraged = true;
        self.is_contribution_friendly = false;
    }

    pub fn add_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Record an inferred contribution type; returns false if already present.
    pub fn add_contribution_type(&mut self, id: &str) -> bool {
        if self.has_contribution_type(id) {
            return false;
        }
        self.contribution_types.push(id.to_string());
        true
    }

    #[must_use]
    pub fn has_contribution_type(&self, id: &str) -> bool {
        self.contribution_types.iter().any(|t| t == id)
    }
}

/// Search criteria supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub languages: Vec<String>,
    pub contribution_types: Vec<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl SearchFilters {
    #[must_use]
    pub fn new<L, T>(languages: L, contribution_types: T) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            contribution_types: contribution_types.into_iter().map(Into::into).collect(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Request-boundary validation: at least one language and one
    /// contribution type, `page >= 1`, `limit` within 1..=100.
    pub fn validate(&self) -> RecommendResult<()> {
        if self.languages.is_empty() {
            return Err(RecommendError::InvalidFilters(
                "At least one language must be selected".into(),
            ));
        }
        if self.contribution_types.is_empty() {
            return Err(RecommendError::InvalidFilters(
                "At least one contribution type must be selected".into(),
            ));
        }
        if self.page < 1 {
            return Err(RecommendError::InvalidFilters("page must be >= 1".into()));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(RecommendError::InvalidFilters(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// How [`UserLanguageSettings`] restricts results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Keep repositories using at least one included language
    #[default]
    Include,
    /// Drop repositories using any excluded language
    Exclude,
}

impl SearchMode {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
        }
    }
}

/// User-level language preferences applied after enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLanguageSettings {
    pub search_mode: SearchMode,
    #[serde(default)]
    pub included_languages: Vec<String>,
    #[serde(default)]
    pub excluded_languages: Vec<String>,
}

impl UserLanguageSettings {
    /// Whether `repo` survives these settings. An empty list for the active
    /// mode keeps everything.
    #[must_use]
    pub fn allows(&self, repo: &Repository) -> bool {
        let repo_languages: Vec<String> = repo.language_set().collect();
        let uses = |lang: &String| repo_languages.contains(&lang.to_lowercase());

        match self.search_mode {
            SearchMode::Include => {
                self.included_languages.is_empty() || self.included_languages.iter().any(uses)
            }
            SearchMode::Exclude => !self.excluded_languages.iter().any(uses),
        }
    }
}

/// Ranked repositories for one request.
///
/// `total_count` is the upstream match count from the first search page,
/// not the number of repositories returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub repositories: Vec<Repository>,
    pub total_count: u64,
    pub page: u32,
}
