//! Data returned by the GitHub access layer.

use crate::recommend::types::{Repository, RepositoryLicense};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language name to byte count, as reported by the languages endpoint.
pub type LanguageBreakdown = BTreeMap<String, u64>;

/// One page of repository search results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    pub items: Vec<Repository>,
}

/// The parts of an issue the recommender looks at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<octocrab::models::issues::Issue> for IssueSummary {
    fn from(issue: octocrab::models::issues::Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            html_url: issue.html_url.to_string(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            created_at: issue.created_at,
        }
    }
}

impl From<octocrab::models::Repository> for Repository {
    fn from(repo: octocrab::models::Repository) -> Self {
        let owner = repo
            .owner
            .as_ref()
            .map(|o| o.login.clone())
            .unwrap_or_default();
        let full_name = repo
            .full_name
            .clone()
            .unwrap_or_else(|| format!("{owner}/{}", repo.name));
        let updated_at = repo.updated_at.or(repo.pushed_at).unwrap_or_else(Utc::now);

        Self {
            id: repo.id.into_inner(),
            name: repo.name,
            full_name,
            owner,
            description: repo.description,
            html_url: repo.html_url.map(|u| u.to_string()),
            language: repo
                .language
                .as_ref()
                .and_then(|v| v.as_str())
                .map(ToString::to_string),
            languages: LanguageBreakdown::new(),
            topics: repo.topics.unwrap_or_default(),
            stargazers_count: repo.stargazers_count.unwrap_or(0),
            forks_count: repo.forks_count.unwrap_or(0),
            open_issues_count: repo.open_issues_count.unwrap_or(0),
            has_issues: repo.has_issues.unwrap_or(false),
            archived: repo.archived,
            disabled: repo.disabled,
            created_at: repo.created_at.unwrap_or(updated_at),
            updated_at,
            pushed_at: repo.pushed_at,
            license: repo.license.map(|l| RepositoryLicense {
                key: l.key,
                name: l.name,
            }),
            has_contributing_guide: false,
            good_first_issues_count: 0,
            readme_analysis: None,
            score: None,
        }
    }
}
