use super::GitHubClient;
use crate::github::error::GitHubResult;
use crate::github::models::{IssueSummary, LanguageBreakdown, SearchPage};
use crate::github::search_query::SearchOptions;
use crate::github::source::RepositorySource;
use async_trait::async_trait;

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn search_repositories(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> GitHubResult<SearchPage> {
        GitHubClient::search_repositories(self, query, options).await
    }

    async fn get_repository_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<LanguageBreakdown> {
        GitHubClient::get_repository_languages(self, owner, repo).await
    }

    async fn check_contributing_guide(&self, owner: &str, repo: &str) -> GitHubResult<bool> {
        GitHubClient::check_contributing_guide(self, owner, repo).await
    }

    async fn get_readme_content(&self, owner: &str, repo: &str) -> GitHubResult<Option<String>> {
        GitHubClient::get_readme_content(self, owner, repo).await
    }

    async fn get_good_first_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<Vec<IssueSummary>> {
        GitHubClient::get_good_first_issues(self, owner, repo).await
    }
}
