//! Fixtures and an in-memory repository source.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use contrib_finder::github::{
    GitHubError, GitHubResult, IssueSummary, LanguageBreakdown, RepositorySource, SearchOptions,
    SearchPage,
};
use contrib_finder::Repository;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// A healthy, growing repository updated a day before [`now`].
pub fn repo(id: u64, full_name: &str) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap();
    Repository {
        id,
        name: name.to_string(),
        full_name: full_name.to_string(),
        owner: owner.to_string(),
        description: Some("A friendly project for everyday tooling".to_string()),
        html_url: Some(format!("https://github.com/{full_name}")),
        language: Some("Rust".to_string()),
        languages: LanguageBreakdown::new(),
        topics: Vec::new(),
        stargazers_count: 120,
        forks_count: 15,
        open_issues_count: 4,
        has_issues: true,
        archived: Some(false),
        disabled: Some(false),
        created_at: now() - Duration::days(500),
        updated_at: now() - Duration::days(1),
        pushed_at: Some(now() - Duration::days(1)),
        license: None,
        has_contributing_guide: false,
        good_first_issues_count: 0,
        readme_analysis: None,
        score: None,
    }
}

pub fn issue(number: u64) -> IssueSummary {
    IssueSummary {
        number,
        title: format!("Starter task {number}"),
        html_url: format!("https://github.com/o/r/issues/{number}"),
        labels: vec!["good first issue".to_string()],
        created_at: now(),
    }
}

pub const WELCOMING_README: &str = "\
# Widget

Widget is a community driven toolkit. Contributions are welcome!

## Contributing

Please fork the repo, clone it locally and open a pull request.
Look for a good first issue if you are new. Released under the MIT license.
";

fn rate_limited() -> GitHubError {
    GitHubError::RateLimitExceeded {
        remaining: 0,
        reset_time: now(),
    }
}

/// Serves canned search pages and per-repository data.
#[derive(Default)]
pub struct MockSource {
    pub pages: HashMap<u32, SearchPage>,
    pub fail_search: bool,
    /// Search fails for these pages only
    pub failing_pages: Vec<u32>,
    /// Every enrichment lookup fails
    pub fail_enrichment: bool,
    /// Enrichment fails for these full names only
    pub failing_repos: Vec<String>,
    pub languages: HashMap<String, LanguageBreakdown>,
    pub contributing: Vec<String>,
    pub readmes: HashMap<String, String>,
    pub good_first_issues: HashMap<String, usize>,
    /// Each language lookup takes this long
    pub lookup_delay: Option<StdDuration>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub search_calls: Mutex<Vec<SearchOptions>>,
    pub queries: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn with_page(mut self, page: u32, total_count: u64, items: Vec<Repository>) -> Self {
        self.pages.insert(page, SearchPage { total_count, items });
        self
    }

    pub fn recorded_searches(&self) -> Vec<SearchOptions> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Most repositories whose language lookups were running at once.
    pub fn max_concurrent_lookups(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn slow_lookup(&self) {
        let Some(delay) = self.lookup_delay else {
            return;
        };
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn check(&self, owner: &str, repo: &str) -> GitHubResult<String> {
        let full_name = format!("{owner}/{repo}");
        if self.fail_enrichment || self.failing_repos.contains(&full_name) {
            return Err(rate_limited());
        }
        Ok(full_name)
    }
}

#[async_trait]
impl RepositorySource for MockSource {
    async fn search_repositories(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> GitHubResult<SearchPage> {
        self.search_calls.lock().unwrap().push(options);
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_search || self.failing_pages.contains(&options.page) {
            return Err(GitHubError::Api("upstream unavailable".into()));
        }
        Ok(self.pages.get(&options.page).cloned().unwrap_or_default())
    }

    async fn get_repository_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<LanguageBreakdown> {
        let key = self.check(owner, repo)?;
        self.slow_lookup().await;
        Ok(self.languages.get(&key).cloned().unwrap_or_default())
    }

    async fn check_contributing_guide(&self, owner: &str, repo: &str) -> GitHubResult<bool> {
        let key = self.check(owner, repo)?;
        Ok(self.contributing.contains(&key))
    }

    async fn get_readme_content(&self, owner: &str, repo: &str) -> GitHubResult<Option<String>> {
        let key = self.check(owner, repo)?;
        Ok(self.readmes.get(&key).cloned())
    }

    async fn get_good_first_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Vec<IssueSummary>> {
        let key = self.check(owner, repo)?;
        let count = self.good_first_issues.get(&key).copied().unwrap_or(0);
        Ok((1..=count as u64).map(issue).collect())
    }
}
