//! Issues API methods

use super::GitHubClient;
use crate::github::error::GitHubResult;
use crate::github::models::IssueSummary;
use log::warn;
use octocrab::params;

/// Labels that mark an issue as suitable for a first contribution.
pub const GOOD_FIRST_ISSUE_LABELS: &str = "good first issue,good-first-issue,beginner-friendly,easy";

/// Filters for listing repository issues.
#[derive(Debug, Clone)]
pub struct IssueListOptions {
    pub state: params::State,
    /// Comma separated label filter, passed through to GitHub
    pub labels: Option<String>,
    pub sort: params::issues::Sort,
    pub direction: params::Direction,
    pub per_page: u8,
    pub page: u32,
}

impl Default for IssueListOptions {
    fn default() -> Self {
        Self {
            state: params::State::Open,
            labels: None,
            sort: params::issues::Sort::Created,
            direction: params::Direction::Descending,
            per_page: 30,
            page: 1,
        }
    }
}

impl GitHubClient {
    /// One page of issues for a repository.
    pub async fn get_repository_issues(
        &self,
        owner: &str,
        repo: &str,
        options: IssueListOptions,
    ) -> GitHubResult<Vec<IssueSummary>> {
        self.ensure_core_budget().await?;

        let labels: Vec<String> = options
            .labels
            .as_deref()
            .map(|l| l.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        let handler = self.inner.issues(owner, repo);
        let mut request = handler
            .list()
            .state(options.state)
            .sort(options.sort)
            .direction(options.direction)
            .per_page(options.per_page)
            .page(options.page);
        if !labels.is_empty() {
            request = request.labels(&labels);
        }

        let page = self.timed("list_issues", request.send()).await?;
        Ok(page.items.into_iter().map(IssueSummary::from).collect())
    }

    /// Open issues labelled for newcomers; empty when the lookup fails.
    pub async fn get_good_first_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Vec<IssueSummary>> {
        let options = IssueListOptions {
            labels: Some(GOOD_FIRST_ISSUE_LABELS.to_string()),
            per_page: 10,
            ..IssueListOptions::default()
        };

        match self.get_repository_issues(owner, repo, options).await {
            Ok(issues) => Ok(issues),
            Err(e) if e.is_rate_limited() => Err(e),
            Err(e) => {
                warn!("Failed to fetch good first issues for {owner}/{repo}: {e}");
                Ok(Vec::new())
            }
        }
    }
}
