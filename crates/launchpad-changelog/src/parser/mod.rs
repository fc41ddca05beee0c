//! Release commit parsing
//!
//! Subjects look like `[v1.2.0] feat(1001,1002): add login https://tracker/1`:
//! an optional version stamp, a lowercase type, optional ticket ids, a colon
//! and a description whose last word may be a link.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{CommitType, ReleaseCommit};
use launchpad_git::CommitInfo;

/// Regex for release commit subjects
static SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:\[[0-9,Vv.]+\]\s*)?",
        r"(?P<type>[a-z]+)(?:\((?P<ticket>[0-9,]+)\))?:(?P<description>.+)",
    ))
    .expect("Invalid regex")
});

/// Regex for a URL-looking word
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+://\S*").expect("Invalid regex"));

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit, `None` when it does not follow the format
    fn parse(&self, commit: &CommitInfo) -> Option<ReleaseCommit>;
}

/// Fields extracted from a subject line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSubject {
    pub commit_type: CommitType,
    pub ticket: Option<String>,
    pub description: String,
    pub link: Option<String>,
}

/// Parse a subject line.
///
/// The description is left-trimmed. A trailing URL is moved to `link` and cut
/// from the description; the text before it is kept as is. Subjects without a
/// description yield `None`.
pub fn parse_subject(subject: &str) -> Option<ParsedSubject> {
    let caps = SUBJECT_REGEX.captures(subject)?;

    let commit_type = CommitType::from_token(caps.name("type")?.as_str());
    let ticket = caps
        .name("ticket")
        .map(|m| m.as_str().to_string())
        .filter(|t| !t.is_empty());
    let content = caps.name("description")?.as_str().trim_start();

    let last_word = content.rsplit(' ').next().unwrap_or_default();
    let (description, link) = if !last_word.is_empty() && LINK_REGEX.is_match(last_word) {
        let cut = content.len() - last_word.len();
        (content[..cut].to_string(), Some(last_word.to_string()))
    } else {
        (content.to_string(), None)
    };

    if description.trim().is_empty() {
        return None;
    }

    Some(ParsedSubject {
        commit_type,
        ticket,
        description,
        link,
    })
}

/// Parser for version-stamped release commits
#[derive(Debug, Default, Clone, Copy)]
pub struct ReleaseCommitParser;

impl ReleaseCommitParser {
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ReleaseCommitParser {
    fn parse(&self, commit: &CommitInfo) -> Option<ReleaseCommit> {
        let Some(parsed) = parse_subject(&commit.message) else {
            debug!(
                hash = %commit.short_hash,
                subject = %commit.message,
                "skipping unparseable commit"
            );
            return None;
        };

        Some(ReleaseCommit {
            commit_type: parsed.commit_type,
            ticket: parsed.ticket,
            description: parsed.description,
            link: parsed.link,
            author: commit.author.clone(),
            timestamp: commit.timestamp,
            subject: commit.message.clone(),
        })
    }
}
