//! Declarative repository filtering, sorting and summary statistics.

use crate::recommend::contribution_types::{
    BUG_FIX, ContributionType, DOCUMENTATION, GOOD_FIRST_ISSUE, TESTING, TRANSLATION,
    contribution_type,
};
use crate::recommend::types::{Repository, SearchFilters};
use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Repositories not updated within this many months fail the quality gate.
const STALE_AFTER_MONTHS: u32 = 24;

const GOOD_FIRST_ISSUE_KEYWORDS: &[&str] = &[
    "good first issue",
    "good-first-issue",
    "beginner",
    "newcomer",
    "easy",
    "starter",
    "first-timers-only",
];

const DOCUMENTATION_TOPICS: &[&str] = &["documentation", "docs", "wiki", "readme", "guide", "tutorial"];

const TRANSLATION_TOPICS: &[&str] = &[
    "i18n",
    "internationalization",
    "localization",
    "translation",
    "locale",
];

const TESTING_KEYWORDS: &[&str] = &["test", "testing", "coverage", "ci", "continuous integration"];

/// Keep repositories that match the language filter, at least one requested
/// contribution type, and the quality gate. Survivors keep their order.
#[must_use]
pub fn filter_repositories(repos: &[Repository], filters: &SearchFilters) -> Vec<Repository> {
    filter_repositories_at(repos, filters, Utc::now())
}

/// [`filter_repositories`] evaluated against a fixed clock.
#[must_use]
pub fn filter_repositories_at(
    repos: &[Repository],
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<Repository> {
    repos
        .iter()
        .filter(|repo| {
            matches_language_filter(repo, &filters.languages)
                && matches_contribution_types(repo, &filters.contribution_types)
                && passes_quality_checks(repo, now)
        })
        .cloned()
        .collect()
}

/// True when no languages are selected, or the primary language or any
/// language in the breakdown matches one, ignoring case.
#[must_use]
pub fn matches_language_filter(repo: &Repository, languages: &[String]) -> bool {
    if languages.is_empty() {
        return true;
    }
    let selected: Vec<String> = languages.iter().map(|l| l.to_lowercase()).collect();
    repo.language_set().any(|lang| selected.contains(&lang))
}

/// True when no types are requested, or the repository supports at least one.
/// Unknown type ids never match.
#[must_use]
pub fn matches_contribution_types(repo: &Repository, types: &[String]) -> bool {
    if types.is_empty() {
        return true;
    }
    types
        .iter()
        .filter_map(|id| contribution_type(id))
        .any(|ct| supports_contribution_type(repo, ct))
}

/// Whether `repo` looks like a place to make this kind of contribution.
#[must_use]
pub fn supports_contribution_type(repo: &Repository, ct: &ContributionType) -> bool {
    let text = searchable_text(repo);
    let keyword_match = ct.matches_text(&text);

    keyword_match
        || match ct.id {
            GOOD_FIRST_ISSUE => {
                repo.good_first_issues_count > 0
                    || GOOD_FIRST_ISSUE_KEYWORDS.iter().any(|k| text.contains(k))
            }
            DOCUMENTATION => has_topic(repo, DOCUMENTATION_TOPICS),
            TRANSLATION => has_topic(repo, TRANSLATION_TOPICS),
            BUG_FIX => repo.has_issues && repo.open_issues_count > 0,
            TESTING => TESTING_KEYWORDS.iter().any(|k| text.contains(k)),
            _ => false,
        }
}

/// Not archived or disabled, has at least one star or fork, and was updated
/// within the last two years.
#[must_use]
pub fn passes_quality_checks(repo: &Repository, now: DateTime<Utc>) -> bool {
    if repo.archived.unwrap_or(false) || repo.disabled.unwrap_or(false) {
        return false;
    }
    if repo.stargazers_count == 0 && repo.forks_count == 0 {
        return false;
    }
    match now.checked_sub_months(Months::new(STALE_AFTER_MONTHS)) {
        Some(cutoff) => repo.updated_at >= cutoff,
        None => true,
    }
}

/// Stable sort by descending score (missing scores count as 0), then by
/// descending star count.
pub fn sort_by_relevance(repos: &mut [Repository]) {
    repos.sort_by(compare_relevance);
}

pub(crate) fn compare_relevance(a: &Repository, b: &Repository) -> Ordering {
    let score_a = a.score.unwrap_or(0.0);
    let score_b = b.score.unwrap_or(0.0);
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.stargazers_count.cmp(&a.stargazers_count))
}

/// Every language seen across the repositories, sorted.
#[must_use]
pub fn extract_languages(repos: &[Repository]) -> Vec<String> {
    repos
        .iter()
        .flat_map(|r| r.language.iter().chain(r.languages.keys()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Summary over a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub total_repositories: usize,
    /// Rounded mean
    pub average_stars: u64,
    /// Rounded mean
    pub average_forks: u64,
    /// Repositories per primary language
    pub languages: BTreeMap<String, usize>,
    pub has_contributing_guide: usize,
    pub has_good_first_issues: usize,
}

#[must_use]
pub fn repository_stats(repos: &[Repository]) -> RepositoryStats {
    let mut stats = RepositoryStats {
        total_repositories: repos.len(),
        ..RepositoryStats::default()
    };
    if repos.is_empty() {
        return stats;
    }

    let mut total_stars: u64 = 0;
    let mut total_forks: u64 = 0;
    for repo in repos {
        total_stars += u64::from(repo.stargazers_count);
        total_forks += u64::from(repo.forks_count);
        if let Some(lang) = &repo.language {
            *stats.languages.entry(lang.clone()).or_insert(0) += 1;
        }
        if repo.has_contributing_guide {
            stats.has_contributing_guide += 1;
        }
        if repo.good_first_issues_count > 0 {
            stats.has_good_first_issues += 1;
        }
    }

    let count = repos.len() as f64;
    stats.average_stars = (total_stars as f64 / count).round() as u64;
    stats.average_forks = (total_forks as f64 / count).round() as u64;
    stats
}

fn searchable_text(repo: &Repository) -> String {
    format!(
        "{} {} {} {}",
        repo.description.as_deref().unwrap_or(""),
        repo.topics.join(" "),
        repo.name,
        repo.full_name
    )
    .to_lowercase()
}

fn has_topic(repo: &Repository, candidates: &[&str]) -> bool {
    repo.topics
        .iter()
        .any(|t| candidates.contains(&t.to_lowercase().as_str()))
}
