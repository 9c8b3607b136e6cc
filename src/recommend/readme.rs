//! README contribution-friendliness analysis
//!
//! Pure, deterministic keyword heuristics over README text. [`analyze_rule_based`]
//! computes the base score out of a fixed denominator; [`analyze`] adds a
//! second pass over tone (welcoming, growth, discouraging language, ...) and is
//! what the search service uses.

use crate::recommend::contribution_types::{
    BUG_FIX, DOCUMENTATION, FEATURE, GOOD_FIRST_ISSUE, REFACTORING, TESTING, TRANSLATION,
};
use crate::recommend::types::ReadmeAnalysis;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

/// READMEs shorter than this (in characters, after trimming) are not analyzed.
pub const MIN_README_CHARS: usize = 100;

/// Accumulated points are divided by this to produce the base score.
const SCORE_DENOMINATOR: f64 = 10.0;

pub const REASON_TOO_SHORT: &str = "README is too short or missing";
pub const REASON_WELCOMING: &str = "Uses welcoming language for contributors";
pub const REASON_WORKFLOW: &str = "Has detailed contribution workflow";
pub const REASON_GROWING: &str = "Shows signs of active, growing project seeking contributors";
pub const REASON_INNOVATIVE: &str = "Appears to be innovative or unique project";
pub const REASON_PASSION: &str = "Appears to be a passion project with engaged maintainer";
pub const REASON_LEARNING: &str = "Appears to be educational/learning-friendly project";
pub const REASON_DISCOURAGING: &str = "Contains discouraging language";

const CONTRIBUTION_KEYWORDS: &[&str] = &[
    "contribute",
    "contributing",
    "contribution",
    "contributors",
    "pull request",
    "pr",
    "issue",
    "bug report",
    "help wanted",
    "good first issue",
    "beginner friendly",
    "open source",
    "community",
    "volunteer",
];

const CONTRIBUTION_SECTIONS: &[&str] = &[
    "contributing",
    "contribution",
    "how to contribute",
    "getting involved",
    "development",
    "building",
    "setup",
    "installation for developers",
];

const ISSUE_SECTIONS: &[&str] = &[
    "issues",
    "bug report",
    "reporting bugs",
    "feedback",
    "support",
    "help",
];

const LICENSE_KEYWORDS: &[&str] = &["license", "mit", "apache", "gpl"];

const DEV_SETUP_KEYWORDS: &[&str] = &[
    "npm install",
    "yarn install",
    "pip install",
    "docker",
    "setup",
    "development environment",
    "local development",
    "build from source",
];

const CONDUCT_KEYWORDS: &[&str] = &["code of conduct", "conduct"];

const BADGE_KEYWORDS: &[&str] = &["badge", "shield", "build status", "coverage", "version"];

/// Word-boundary phrases that suggest each contribution type.
const TYPE_PATTERNS: &[(&str, &[&str])] = &[
    (
        BUG_FIX,
        &[
            "bug",
            "fix",
            "issue",
            "error",
            "problem",
            "debug",
            "report bug",
            "bug report",
            "reporting issues",
            "found a bug",
            "troubleshooting",
            "known issues",
            "issue tracker",
        ],
    ),
    (
        FEATURE,
        &[
            "feature",
            "enhancement",
            "improvement",
            "new feature",
            "feature request",
            "roadmap",
            "planned features",
            "implement",
            "add support",
            "extend",
            "build",
        ],
    ),
    (
        DOCUMENTATION,
        &[
            "docs",
            "documentation",
            "readme",
            "wiki",
            "guide",
            "tutorial",
            "api documentation",
            "user guide",
            "developer guide",
            "documentation needed",
            "docs needed",
            "help with docs",
            "improve documentation",
            "doc improvements",
        ],
    ),
    (
        TESTING,
        &[
            "test",
            "testing",
            "spec",
            "coverage",
            "qa",
            "quality assurance",
            "unit test",
            "integration test",
            "e2e test",
            "automated testing",
            "need tests",
            "test coverage",
            "add tests",
            "testing help wanted",
        ],
    ),
    (
        TRANSLATION,
        &[
            "translation",
            "i18n",
            "internationalization",
            "locale",
            "language",
            "translate",
            "localization",
            "multilingual",
            "help translate",
            "translation needed",
            "add language support",
        ],
    ),
    (
        REFACTORING,
        &[
            "refactor",
            "cleanup",
            "optimization",
            "performance",
            "code quality",
            "modernize",
            "improve code",
            "code review",
            "technical debt",
            "architecture",
            "restructure",
        ],
    ),
    (
        GOOD_FIRST_ISSUE,
        &[
            "beginner",
            "good first issue",
            "easy",
            "starter",
            "newcomer",
            "first time",
            "new contributor",
            "help wanted",
            "beginner friendly",
            "contribution welcome",
            "easy pick",
            "low hanging fruit",
        ],
    ),
];

/// Plain substrings hinting at work that still needs doing.
const IMPLICIT_NEEDS: &[(&str, &[&str])] = &[
    (
        DOCUMENTATION,
        &[
            "todo",
            "work in progress",
            "wip",
            "coming soon",
            "not yet implemented",
            "placeholder",
            "stub",
        ],
    ),
    (
        FEATURE,
        &[
            "planned",
            "roadmap",
            "future",
            "wishlist",
            "would like to",
            "hoping to add",
            "considering",
        ],
    ),
    (
        TESTING,
        &[
            "untested",
            "no tests yet",
            "testing needed",
            "manual testing",
            "needs verification",
        ],
    ),
    (
        BUG_FIX,
        &[
            "known bug",
            "limitation",
            "workaround",
            "current issues",
            "not working",
            "broken",
        ],
    ),
];

const WELCOMING_PHRASES: &[&str] = &[
    "welcome",
    "invite",
    "encourage",
    "love to hear",
    "contributions are welcome",
    "we welcome",
    "feel free",
    "please contribute",
    "join us",
    "get involved",
    "help wanted",
    "looking for contributors",
    "seeking help",
];

const GROWTH_INDICATORS: &[&str] = &[
    "vision",
    "goal",
    "mission",
    "aims to",
    "will become",
    "plan to",
    "working towards",
    "building",
    "in development",
    "actively maintained",
    "regular updates",
    "frequent commits",
    "ongoing work",
    "community",
    "team",
    "contributors",
    "collaborators",
    "growing project",
    "early adopters",
    "help needed",
    "looking for",
    "seeking",
    "volunteers",
    "maintainers wanted",
    "co-maintainers",
];

const INNOVATION_INDICATORS: &[&str] = &[
    "novel",
    "new approach",
    "innovative",
    "unique",
    "different",
    "alternative to",
    "better than",
    "solves",
    "addresses",
    "experimental",
    "cutting-edge",
    "modern",
];

const PASSION_INDICATORS: &[&str] = &[
    "passionate",
    "love",
    "excited",
    "enthusiastic",
    "personal project",
    "side project",
    "hobby",
    "weekend project",
    "created because",
];

const LEARNING_INDICATORS: &[&str] = &[
    "learning",
    "beginner",
    "tutorial",
    "educational",
    "step by step",
    "learn by doing",
    "practice",
    "example",
    "demo",
    "showcase",
];

const DISCOURAGING_PHRASES: &[&str] = &[
    "no contributions",
    "not accepting",
    "closed to contributions",
    "maintainers only",
    "internal use only",
    "private project",
];

type TypeMatchers = Vec<(&'static str, Vec<Regex>)>;

lazy_static! {
    static ref TYPE_MATCHERS: Result<TypeMatchers, regex::Error> = TYPE_PATTERNS
        .iter()
        .map(|(id, phrases)| {
            let regexes = phrases
                .iter()
                .map(|p| Regex::new(&format!(r"\b{}\b", regex::escape(p))))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, regex::Error>((*id, regexes))
        })
        .collect();
}

/// Base analysis: keyword and section heuristics plus contribution-type
/// inference, without the tone pass.
#[must_use]
pub fn analyze_rule_based(readme: Option<&str>) -> ReadmeAnalysis {
    let mut analysis = ReadmeAnalysis::default();

    let Some(text) = readme.filter(|t| t.trim().chars().count() >= MIN_README_CHARS) else {
        analysis.add_reason(REASON_TOO_SHORT);
        return analysis;
    };

    let content = text.to_lowercase();
    let base = score_contribution_signals(&content, &mut analysis);
    detect_contribution_types(&content, &mut analysis);
    analysis.set_score(base);
    analysis
}

/// Full analysis: the rule-based pass followed by tone adjustments.
///
/// A README shorter than [`MIN_README_CHARS`] yields a zero score with
/// [`REASON_TOO_SHORT`] and nothing else.
#[must_use]
pub fn analyze(readme: Option<&str>) -> ReadmeAnalysis {
    let mut analysis = analyze_rule_based(readme);
    if let Some(text) = readme.filter(|t| t.trim().chars().count() >= MIN_README_CHARS) {
        apply_tone_adjustments(&text.to_lowercase(), &mut analysis);
    }
    analysis
}

fn count_present(content: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| content.contains(*p)).count()
}

fn has_heading(content: &str, section: &str) -> bool {
    content.contains(&format!("## {section}")) || content.contains(&format!("# {section}"))
}

fn score_contribution_signals(content: &str, analysis: &mut ReadmeAnalysis) -> f64 {
    let mut points = 0.0;

    let keywords = count_present(content, CONTRIBUTION_KEYWORDS);
    if keywords > 0 {
        points += (keywords as f64 * 0.5).min(3.0);
        analysis.add_reason(format!("Found {keywords} contribution-related keywords"));
    }

    for section in CONTRIBUTION_SECTIONS {
        if has_heading(content, section) {
            points += 1.0;
            analysis.has_contributing_section = true;
            analysis.add_reason(format!("Has '{section}' section"));
        }
    }

    for section in ISSUE_SECTIONS {
        if has_heading(content, section) {
            points += 0.5;
            analysis.has_issues_section = true;
            analysis.add_reason(format!("Has '{section}' section"));
        }
    }

    if count_present(content, LICENSE_KEYWORDS) > 0 {
        points += 0.5;
        analysis.has_license = true;
        analysis.add_reason("Has license information");
    }

    if count_present(content, DEV_SETUP_KEYWORDS) > 0 {
        points += 1.0;
        analysis.add_reason("Has development setup instructions");
    }

    if count_present(content, CONDUCT_KEYWORDS) > 0 {
        points += 0.5;
        analysis.add_reason("Has code of conduct");
    }

    if count_present(content, BADGE_KEYWORDS) > 0 {
        points += 0.5;
        analysis.add_reason("Has project status badges");
    }

    (points / SCORE_DENOMINATOR).min(1.0)
}

fn detect_contribution_types(content: &str, analysis: &mut ReadmeAnalysis) {
    match TYPE_MATCHERS.as_ref() {
        Ok(matchers) => {
            for (id, regexes) in matchers {
                let hits: usize = regexes.iter().map(|re| re.find_iter(content).count()).sum();
                if hits > 0 {
                    analysis.add_contribution_type(id);
                }
            }
        }
        Err(e) => warn!("Contribution type patterns failed to compile: {e}"),
    }

    for (id, phrases) in IMPLICIT_NEEDS {
        if count_present(content, phrases) > 0 && analysis.add_contribution_type(id) {
            analysis.add_reason(format!("Detected potential need for {id} contributions"));
        }
    }
}

fn apply_tone_adjustments(content: &str, analysis: &mut ReadmeAnalysis) {
    if count_present(content, WELCOMING_PHRASES) > 0 {
        analysis.adjust_score(0.2);
        analysis.add_reason(REASON_WELCOMING);
    }

    if ["fork", "pull request", "clone"]
        .iter()
        .all(|p| content.contains(p))
    {
        analysis.adjust_score(0.15);
        analysis.add_reason(REASON_WORKFLOW);
    }

    if count_present(content, GROWTH_INDICATORS) > 2 {
        analysis.adjust_score(0.15);
        analysis.add_reason(REASON_GROWING);
    }

    if count_present(content, INNOVATION_INDICATORS) > 1 {
        analysis.adjust_score(0.1);
        analysis.add_reason(REASON_INNOVATIVE);
    }

    if count_present(content, PASSION_INDICATORS) > 0 {
        analysis.adjust_score(0.05);
        analysis.add_reason(REASON_PASSION);
    }

    if count_present(content, LEARNING_INDICATORS) > 1 {
        analysis.add_contribution_type(GOOD_FIRST_ISSUE);
        analysis.add_reason(REASON_LEARNING);
    }

    if count_present(content, DISCOURAGING_PHRASES) > 0 {
        analysis.discourage();
        analysis.adjust_score(-0.3);
        analysis.add_reason(REASON_DISCOURAGING);
    }
}
