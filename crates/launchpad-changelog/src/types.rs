//! Release commit types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change a commit carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Build,
    Refactor,
    Other,
}

impl CommitType {
    /// Types accepted by the commit-msg check, in guidance order
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Build,
            CommitType::Refactor,
            CommitType::Other,
        ]
    }

    /// Map a lowercase type token; anything unknown is `Other`
    pub fn from_token(token: &str) -> Self {
        match token {
            "feat" => Self::Feat,
            "fix" => Self::Fix,
            "docs" => Self::Docs,
            "build" => Self::Build,
            "refactor" => Self::Refactor,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Build => "build",
            Self::Refactor => "refactor",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version-stamped commit included in a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCommit {
    /// Commit type
    pub commit_type: CommitType,
    /// Ticket ids from the parentheses, e.g. `1001` or `1001,1002`
    pub ticket: Option<String>,
    /// Description, never empty
    pub description: String,
    /// Trailing URL moved out of the description
    pub link: Option<String>,
    /// Author name
    pub author: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
    /// Original subject line
    pub subject: String,
}

impl ReleaseCommit {
    /// Whether the commit references a ticket
    pub fn has_ticket(&self) -> bool {
        self.ticket.as_deref().is_some_and(|t| !t.is_empty())
    }
}
