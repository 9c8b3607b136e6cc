//! Repository search, language, and content lookups

use super::GitHubClient;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::{LanguageBreakdown, SearchPage};
use crate::github::search_query::SearchOptions;
use crate::recommend::types::Repository;
use log::{debug, warn};
use octocrab::models::repos::Content;

/// Locations probed, in order, for a contributing guide.
pub const CONTRIBUTING_GUIDE_PATHS: [&str; 6] = [
    "CONTRIBUTING.md",
    "CONTRIBUTING",
    ".github/CONTRIBUTING.md",
    "docs/CONTRIBUTING.md",
    "docs/contributing.md",
    "contributing.md",
];

/// README file names probed, in order.
pub const README_PATHS: [&str; 5] = ["README.md", "README", "readme.md", "readme", "Readme.md"];

impl GitHubClient {
    /// Search repositories with GitHub's search syntax.
    ///
    /// Refreshes the tracked rate-limit budget after every successful call.
    pub async fn search_repositories(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> GitHubResult<SearchPage> {
        if query.trim().is_empty() {
            return Err(GitHubError::InvalidInput(
                "search query cannot be empty".into(),
            ));
        }
        if options.page < 1 {
            return Err(GitHubError::InvalidInput("page must be >= 1".into()));
        }
        if !(1..=100).contains(&options.per_page) {
            return Err(GitHubError::InvalidInput(
                "per_page must be between 1 and 100".into(),
            ));
        }

        self.ensure_search_budget().await?;

        let request = self
            .inner
            .search()
            .repositories(query)
            .sort(options.sort.as_str())
            .order(options.order.as_str())
            .per_page(options.per_page)
            .page(options.page);

        let page = self.timed("repository_search", request.send()).await?;
        let remaining = self.refresh_rate_limit().await;
        debug!(
            "Search page {} returned {} items ({remaining} searches left)",
            options.page,
            page.items.len()
        );

        Ok(SearchPage {
            total_count: page.total_count.unwrap_or(0),
            items: page.items.into_iter().map(Repository::from).collect(),
        })
    }

    /// Fetch a single repository.
    pub async fn get_repository_details(&self, owner: &str, repo: &str) -> GitHubResult<Repository> {
        self.ensure_core_budget().await?;
        let details = self
            .timed("repository_details", self.inner.repos(owner, repo).get())
            .await?;
        Ok(Repository::from(details))
    }

    /// Language breakdown for a repository; empty when the lookup fails.
    pub async fn get_repository_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<LanguageBreakdown> {
        self.ensure_core_budget().await?;
        match self
            .timed("list_languages", self.inner.repos(owner, repo).list_languages())
            .await
        {
            Ok(languages) => Ok(languages
                .into_iter()
                .map(|(name, bytes)| (name, bytes.max(0) as u64))
                .collect()),
            Err(e) if e.is_rate_limited() => Err(e),
            Err(e) => {
                warn!("Failed to fetch languages for {owner}/{repo}: {e}");
                Ok(LanguageBreakdown::new())
            }
        }
    }

    /// Contents at `path`, or `None` when the path does not exist.
    pub async fn get_repository_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> GitHubResult<Option<Vec<Content>>> {
        self.ensure_core_budget().await?;
        let handler = self.inner.repos(owner, repo);
        let request = handler.get_content().path(path);

        match self.timed("get_content", request.send()).await {
            Ok(items) => Ok(Some(items.items)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether any of the well-known contributing guide paths exists.
    pub async fn check_contributing_guide(&self, owner: &str, repo: &str) -> GitHubResult<bool> {
        for path in CONTRIBUTING_GUIDE_PATHS {
            match self.get_repository_contents(owner, repo, path).await {
                Ok(Some(_)) => return Ok(true),
                Ok(None) => {}
                Err(e) if e.is_rate_limited() => return Err(e),
                Err(e) => debug!("Probe of {owner}/{repo}/{path} failed: {e}"),
            }
        }
        Ok(false)
    }

    /// Decoded README text from the first well-known file name that exists.
    pub async fn get_readme_content(&self, owner: &str, repo: &str) -> GitHubResult<Option<String>> {
        for path in README_PATHS {
            match self.get_repository_contents(owner, repo, path).await {
                Ok(Some(items)) => {
                    // A directory listing has no body; keep probing
                    if let Some(text) = items.iter().find_map(Content::decoded_content) {
                        return Ok(Some(text));
                    }
                }
                Ok(None) => {}
                Err(e) if e.is_rate_limited() => return Err(e),
                Err(e) => debug!("README probe {owner}/{repo}/{path} failed: {e}"),
            }
        }
        Ok(None)
    }
}
