//! Composite relevance scoring
//!
//! Four sub-scores in [0, 1] (language match, contribution-type match,
//! activity, beginner friendliness) are combined with weights that depend on
//! how mature the project is. Every function takes `now` explicitly.

use crate::recommend::contribution_types::{GOOD_FIRST_ISSUE, contribution_type};
use crate::recommend::readme::{REASON_WELCOMING, REASON_WORKFLOW};
use crate::recommend::types::{ReadmeAnalysis, Repository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Languages close enough that knowing one helps with the other.
const RELATED_LANGUAGE_GROUPS: &[&[&str]] = &[
    &["javascript", "typescript", "node.js"],
    &["python", "python3"],
    &["java", "kotlin", "scala"],
    &["c", "c++", "cpp"],
    &["c#", "csharp", "f#"],
    &["ruby", "rails"],
    &["php", "laravel"],
    &["swift", "objective-c"],
    &["rust", "go", "zig"],
];

const BEGINNER_DOC_TOPICS: &[&str] = &["documentation", "docs", "tutorial", "guide"];

/// Project maturity, derived from stars and age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectMaturity {
    EarlyStage,
    Growing,
    Mature,
}

impl ProjectMaturity {
    /// `EarlyStage` under 50 stars and a year old, `Growing` under 500 stars
    /// or two years old, otherwise `Mature`.
    #[must_use]
    pub fn classify(repo: &Repository, now: DateTime<Utc>) -> Self {
        let age_days = (now - repo.created_at).num_days();
        let stars = repo.stargazers_count;

        if stars < 50 && age_days < 365 {
            Self::EarlyStage
        } else if stars < 500 || age_days < 730 {
            Self::Growing
        } else {
            Self::Mature
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyStage => "early-stage",
            Self::Growing => "growing",
            Self::Mature => "mature",
        }
    }

    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        match self {
            Self::EarlyStage => ScoreWeights {
                language: 0.20,
                contribution_type: 0.20,
                activity: 0.35,
                beginner_friendly: 0.25,
            },
            Self::Growing => ScoreWeights {
                language: 0.25,
                contribution_type: 0.30,
                activity: 0.25,
                beginner_friendly: 0.20,
            },
            Self::Mature => ScoreWeights {
                language: 0.30,
                contribution_type: 0.30,
                activity: 0.15,
                beginner_friendly: 0.25,
            },
        }
    }

    /// Multiplier on README friendliness when adding the final boost.
    const fn readme_boost(&self) -> f64 {
        match self {
            Self::EarlyStage => 0.15,
            _ => 0.10,
        }
    }
}

/// Weights of the four sub-scores; each tier sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub language: f64,
    pub contribution_type: f64,
    pub activity: f64,
    pub beginner_friendly: f64,
}

/// Score breakdown for one repository.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryScore {
    pub language_match: f64,
    pub contribution_type_match: f64,
    pub activity: f64,
    pub beginner_friendly: f64,
    pub total: f64,
}

/// Everything the composite score looks at, beyond `now`.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub repo: &'a Repository,
    pub selected_languages: &'a [String],
    pub contribution_types: &'a [String],
}

/// Composite score for an enriched repository.
///
/// Reads the enrichment fields (`languages`, `has_contributing_guide`,
/// `good_first_issues_count`, `readme_analysis`) from the repository.
#[must_use]
pub fn score_repository(input: ScoringInput<'_>, now: DateTime<Utc>) -> RepositoryScore {
    let repo = input.repo;
    let maturity = ProjectMaturity::classify(repo, now);
    let readme = repo.readme_analysis.as_ref();

    let language_match = language_match_score(repo, input.selected_languages);
    let contribution_type_match = contribution_type_score(repo, input.contribution_types);
    let activity = activity_score(repo, maturity, now);
    let beginner_friendly = beginner_friendly_score(repo, readme, maturity);

    let weights = maturity.weights();
    let mut total = language_match * weights.language
        + contribution_type_match * weights.contribution_type
        + activity * weights.activity
        + beginner_friendly * weights.beginner_friendly;

    if let Some(analysis) = readme.filter(|a| a.is_contribution_friendly) {
        total += analysis.contribution_score * maturity.readme_boost();
    }

    RepositoryScore {
        language_match,
        contribution_type_match,
        activity,
        beginner_friendly,
        total: total.clamp(0.0, 1.0),
    }
}

/// 0.8 for a primary-language match plus 0.4 when another language in the
/// breakdown also matches; failing both, 0.3 for a related language.
#[must_use]
pub fn language_match_score(repo: &Repository, selected: &[String]) -> f64 {
    if selected.is_empty() {
        return 0.8;
    }

    let selected: Vec<String> = selected.iter().map(|l| l.to_lowercase()).collect();
    let primary = repo.language.as_ref().map(|l| l.to_lowercase());
    let breakdown: Vec<String> = repo.languages.keys().map(|l| l.to_lowercase()).collect();

    let mut score: f64 = 0.0;
    if primary.as_ref().is_some_and(|p| selected.contains(p)) {
        score += 0.8;
    }
    let secondary_match = breakdown
        .iter()
        .any(|l| selected.contains(l) && primary.as_ref() != Some(l));
    if secondary_match {
        score += 0.4;
    }

    if score == 0.0 && related_language_match(&selected, primary.as_deref(), &breakdown) {
        score = 0.3;
    }

    score.min(1.0)
}

fn related_language_match(selected: &[String], primary: Option<&str>, breakdown: &[String]) -> bool {
    RELATED_LANGUAGE_GROUPS.iter().any(|group| {
        let selected_in_group = selected.iter().any(|l| group.contains(&l.as_str()));
        let repo_in_group = primary.is_some_and(|p| group.contains(&p))
            || breakdown.iter().any(|l| group.contains(&l.as_str()));
        selected_in_group && repo_in_group
    })
}

/// Fraction of requested types the repository matches by keyword in its
/// description or topics. `good-first-issue` also matches on open
/// good-first-issues. Unknown ids count as unmatched.
#[must_use]
pub fn contribution_type_score(repo: &Repository, requested: &[String]) -> f64 {
    if requested.is_empty() {
        return 0.0;
    }

    let text = format!(
        "{} {}",
        repo.description.as_deref().unwrap_or(""),
        repo.topics.join(" ")
    )
    .to_lowercase();

    let matched = requested
        .iter()
        .filter(|id| {
            contribution_type(id).is_some_and(|ct| {
                ct.matches_text(&text)
                    || (ct.id == GOOD_FIRST_ISSUE && repo.good_first_issues_count > 0)
            })
        })
        .count();

    matched as f64 / requested.len() as f64
}

/// Recency tier adjusted by maturity.
#[must_use]
pub fn activity_score(repo: &Repository, maturity: ProjectMaturity, now: DateTime<Utc>) -> f64 {
    let days = days_since_update(repo, now);
    let mut score = match days {
        d if d <= 7 => 1.0,
        d if d <= 30 => 0.8,
        d if d <= 90 => 0.6,
        d if d <= 365 => 0.4,
        _ => 0.2,
    };

    if maturity == ProjectMaturity::EarlyStage {
        if days > 30 {
            score *= 0.5;
        }
        score += (f64::from(repo.forks_count) / 5.0).min(0.2);
    } else {
        score += (f64::from(repo.stargazers_count) / 1000.0).min(0.3);
    }

    score.clamp(0.0, 1.0)
}

/// How approachable the project looks to a first-time contributor.
#[must_use]
pub fn beginner_friendly_score(
    repo: &Repository,
    readme: Option<&ReadmeAnalysis>,
    maturity: ProjectMaturity,
) -> f64 {
    let has_good_first_issues = repo.good_first_issues_count > 0;
    let mut score: f64 = 0.0;

    if repo.has_contributing_guide {
        score += 0.4;
    }
    if has_good_first_issues {
        score += 0.4;
    }
    if repo
        .topics
        .iter()
        .any(|t| BEGINNER_DOC_TOPICS.contains(&t.to_lowercase().as_str()))
    {
        score += 0.1;
    }

    if let Some(analysis) = readme {
        let weight = if maturity == ProjectMaturity::EarlyStage { 1.5 } else { 1.0 };
        if analysis.is_contribution_friendly {
            score += 0.3 * weight;
        }
        if analysis.has_contributing_section {
            score += 0.1 * weight;
        }
        if analysis.has_issues_section {
            score += 0.1 * weight;
        }
        if analysis.has_contribution_type(GOOD_FIRST_ISSUE) {
            score += 0.1;
        }
    }

    match maturity {
        ProjectMaturity::EarlyStage => {
            let welcoming = readme.is_some_and(|a| {
                a.reasons
                    .iter()
                    .any(|r| r == REASON_WELCOMING || r == REASON_WORKFLOW)
            });
            if welcoming {
                score += 0.2;
            }
            if repo.stargazers_count < 20 && repo.forks_count < 10 {
                score += 0.1;
            }
        }
        ProjectMaturity::Mature if !repo.has_contributing_guide && !has_good_first_issues => {
            score *= 0.8;
        }
        _ => {}
    }

    score.clamp(0.0, 1.0)
}

/// Baseline for repositories whose enrichment failed, from search-result
/// fields only. Lands between 0.3 and 1.
#[must_use]
pub fn basic_score(repo: &Repository, now: DateTime<Utc>) -> f64 {
    let mut score = 0.3;

    let days = days_since_update(repo, now);
    if days <= 30 {
        score += 0.2;
    } else if days <= 90 {
        score += 0.1;
    }

    if repo.stargazers_count > 0 {
        score += (f64::from(repo.stargazers_count).log10() / 10.0).min(0.2);
    }
    if repo
        .description
        .as_ref()
        .is_some_and(|d| d.chars().count() > 20)
    {
        score += 0.1;
    }
    if repo.open_issues_count > 0 {
        score += 0.1;
    }
    if !repo.topics.is_empty() {
        score += 0.1;
    }

    score.min(1.0)
}

fn days_since_update(repo: &Repository, now: DateTime<Utc>) -> i64 {
    (now - repo.updated_at).num_days()
}
