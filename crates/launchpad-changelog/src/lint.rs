//! Commit message format check and version stamping

use regex::Regex;
use std::sync::LazyLock;

use crate::types::CommitType;

static MERGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Merge branch.+").expect("Invalid regex"));

static SIMPLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|build|refactor|other):.+").expect("Invalid regex")
});

static TICKETED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|build|refactor|other)(\([0-9]+\))+:.+").expect("Invalid regex")
});

/// A leading `[...]` version stamp
static STAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]\s]+\]\s*").expect("Invalid regex"));

/// Accepted message forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `Merge branch ...`
    Merge,
    /// `type:description`
    Simple,
    /// `type(id):description`
    Ticketed,
}

/// Whether the message already starts with a `[...]` stamp
pub fn is_stamped(message: &str) -> bool {
    STAMP_REGEX.is_match(message)
}

/// Classify a trimmed commit message, `None` when it is malformed.
///
/// A leading stamp from an earlier run (amend, rebase) is ignored.
pub fn classify(message: &str) -> Option<MessageKind> {
    let body = STAMP_REGEX.replace(message, "");
    if MERGE_REGEX.is_match(&body) {
        Some(MessageKind::Merge)
    } else if TICKETED_REGEX.is_match(&body) {
        Some(MessageKind::Ticketed)
    } else if SIMPLE_REGEX.is_match(&body) {
        Some(MessageKind::Simple)
    } else {
        None
    }
}

/// Message with the branch version stamped in front.
///
/// Merge messages and already stamped messages are returned unchanged.
pub fn stamp(message: &str, version: &str) -> String {
    if is_stamped(message) || classify(message) == Some(MessageKind::Merge) {
        return message.to_string();
    }
    format!("[{version}] {message}")
}

/// Version stamp for a branch: its last `/` segment
pub fn branch_version(branch: &str) -> &str {
    branch.rsplit('/').next().unwrap_or(branch)
}

/// One accepted format with an example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRule {
    pub title: &'static str,
    pub format: String,
    pub example: String,
}

/// Accepted formats, one or two per commit type
pub fn format_rules() -> Vec<FormatRule> {
    let mut rules = Vec::new();
    for ty in CommitType::all() {
        let (title, ticketed, simple) = match ty {
            CommitType::Feat => (
                "New feature or requirement",
                Some("feat(1017075):SDK debug page"),
                "feat: responsive layout on every page",
            ),
            CommitType::Fix => (
                "Bug fix",
                Some("fix(1026053):query returns no data"),
                "fix:layout misalignment on small screens",
            ),
            CommitType::Docs => ("Documentation", None, "docs:add README.md"),
            CommitType::Build => ("Build change", None, "build:switch domain"),
            CommitType::Refactor => (
                "Refactor or optimisation",
                None,
                "refactor:simplify empty-state loading",
            ),
            CommitType::Other => ("Anything else", None, "other:format code, add comments"),
        };

        if let Some(example) = ticketed {
            rules.push(FormatRule {
                title,
                format: format!("{ty}(<ticket id>):<ticket description>"),
                example: example.to_string(),
            });
        }
        rules.push(FormatRule {
            title,
            format: format!("{ty}:<description>"),
            example: simple.to_string(),
        });
    }
    rules
}
