//! Static catalog of contribution types and popular languages.

use serde::Serialize;

/// A kind of contribution a developer can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionType {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Matched case-insensitively against repository text
    pub keywords: &'static [&'static str],
}

impl ContributionType {
    /// True if `text` (already lowercased) contains any keyword.
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

pub const DOCUMENTATION: &str = "documentation";
pub const TRANSLATION: &str = "translation";
pub const BUG_FIX: &str = "bug-fix";
pub const FEATURE: &str = "feature";
pub const TESTING: &str = "testing";
pub const REFACTORING: &str = "refactoring";
pub const GOOD_FIRST_ISSUE: &str = "good-first-issue";

pub const CONTRIBUTION_TYPES: [ContributionType; 7] = [
    ContributionType {
        id: DOCUMENTATION,
        label: "Documentation",
        description: "Improve docs and READMEs, add comments",
        keywords: &["documentation", "docs", "readme", "wiki"],
    },
    ContributionType {
        id: TRANSLATION,
        label: "Translation",
        description: "Multilingual support, translate documentation",
        keywords: &["translation", "i18n", "localization", "locale"],
    },
    ContributionType {
        id: BUG_FIX,
        label: "Bug fixes",
        description: "Report and fix bugs",
        keywords: &["bug", "fix", "issue", "error"],
    },
    ContributionType {
        id: FEATURE,
        label: "Features",
        description: "Build new functionality",
        keywords: &["feature", "enhancement", "improvement"],
    },
    ContributionType {
        id: TESTING,
        label: "Testing",
        description: "Write unit and integration tests",
        keywords: &["test", "testing", "spec", "coverage"],
    },
    ContributionType {
        id: REFACTORING,
        label: "Refactoring",
        description: "Improve code structure and performance",
        keywords: &["refactor", "cleanup", "optimization", "performance"],
    },
    ContributionType {
        id: GOOD_FIRST_ISSUE,
        label: "Good first issues",
        description: "Issues suited to a first contribution",
        keywords: &["good-first-issue", "beginner", "easy", "starter"],
    },
];

/// Look up a contribution type by id.
#[must_use]
pub fn contribution_type(id: &str) -> Option<&'static ContributionType> {
    CONTRIBUTION_TYPES.iter().find(|ct| ct.id == id)
}

/// A language offered for selection, with its GitHub color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub color: &'static str,
}

pub const POPULAR_LANGUAGES: [Language; 16] = [
    Language { name: "JavaScript", color: "#f1e05a" },
    Language { name: "TypeScript", color: "#2b7489" },
    Language { name: "Python", color: "#3572A5" },
    Language { name: "Java", color: "#b07219" },
    Language { name: "Go", color: "#00ADD8" },
    Language { name: "Rust", color: "#dea584" },
    Language { name: "C++", color: "#f34b7d" },
    Language { name: "C#", color: "#239120" },
    Language { name: "PHP", color: "#4F5D95" },
    Language { name: "Ruby", color: "#701516" },
    Language { name: "Swift", color: "#ffac45" },
    Language { name: "Kotlin", color: "#F18E33" },
    Language { name: "HTML", color: "#e34c26" },
    Language { name: "CSS", color: "#1572B6" },
    Language { name: "Vue", color: "#2c3e50" },
    Language { name: "React", color: "#61dafb" },
];
