//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Full commit message body
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Tagger name (for annotated tags)
    pub tagger: Option<String>,
    /// Creation date: tagger date for annotated tags, committer date otherwise
    pub timestamp: DateTime<Utc>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(
        name: impl Into<String>,
        commit_hash: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            message: None,
            tagger: None,
            timestamp,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the tagger
    pub fn with_tagger(mut self, tagger: impl Into<String>) -> Self {
        self.tagger = Some(tagger.into());
        self
    }
}
