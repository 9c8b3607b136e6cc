//! Repository search parameters and query construction.

use serde::{Deserialize, Serialize};

/// Sort field for repository search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchSort {
    /// Sort by stargazer count
    Stars,
    /// Sort by fork count
    Forks,
    /// Sort by number of issues labelled `help-wanted`
    HelpWantedIssues,
    /// Sort by last update time
    Updated,
}

impl SearchSort {
    /// Returns the GitHub API string representation of this sort field.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::HelpWantedIssues => "help-wanted-issues",
            Self::Updated => "updated",
        }
    }
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    /// Ascending order (low to high, old to new)
    Asc,
    /// Descending order (high to low, new to old)
    Desc,
}

impl SearchOrder {
    /// Returns the GitHub API string representation of this sort order.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Paging and ordering for a single repository search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub sort: SearchSort,
    pub order: SearchOrder,
    pub per_page: u8,
    pub page: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sort: SearchSort::Stars,
            order: SearchOrder::Desc,
            per_page: 30,
            page: 1,
        }
    }
}

/// Builds GitHub repository search queries from structured filters.
///
/// Languages and licenses are OR'd inside parentheses, topics are each added
/// as their own qualifier, and every query ends with `is:public archived:false`.
///
/// ```
/// use contrib_finder::github::SearchQueryBuilder;
///
/// let query = SearchQueryBuilder::new()
///     .languages(["Rust", "Go"])
///     .min_stars(10)
///     .build();
/// assert_eq!(
///     query,
///     "(language:rust OR language:go) stars:>=10 is:public archived:false"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    languages: Vec<String>,
    min_stars: Option<u32>,
    max_stars: Option<u32>,
    has_issues: bool,
    licenses: Vec<String>,
    topics: Vec<String>,
    good_first_issues: bool,
}

impl SearchQueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(languages.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn min_stars(mut self, stars: u32) -> Self {
        self.min_stars = Some(stars);
        self
    }

    #[must_use]
    pub fn max_stars(mut self, stars: u32) -> Self {
        self.max_stars = Some(stars);
        self
    }

    #[must_use]
    pub fn has_issues(mut self, has_issues: bool) -> Self {
        self.has_issues = has_issues;
        self
    }

    #[must_use]
    pub fn licenses<I, S>(mut self, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.licenses.extend(licenses.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics.extend(topics.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn good_first_issues(mut self, required: bool) -> Self {
        self.good_first_issues = required;
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.languages.is_empty() {
            parts.push(or_group("language", &self.languages));
        }

        if let Some(min) = self.min_stars {
            parts.push(format!("stars:>={min}"));
        }
        if let Some(max) = self.max_stars {
            parts.push(format!("stars:<={max}"));
        }

        if self.has_issues {
            parts.push("has:issues".to_string());
        }

        if !self.licenses.is_empty() {
            parts.push(or_group("license", &self.licenses));
        }

        for topic in &self.topics {
            parts.push(format!("topic:{topic}"));
        }

        if self.good_first_issues {
            parts.push("good-first-issues:>0".to_string());
        }

        parts.push("is:public".to_string());
        parts.push("archived:false".to_string());

        parts.join(" ")
    }
}

fn or_group(qualifier: &str, values: &[String]) -> String {
    let joined = values
        .iter()
        .map(|v| format!("{qualifier}:{}", v.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("({joined})")
}
