//! Git mutations the release workflow can request

use std::fmt;

/// One mutating git command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitStep {
    /// `git checkout <branch>`
    Checkout(String),
    /// `git checkout -b <branch>`
    CheckoutNew(String),
    /// `git pull`
    Pull,
    /// `git pull <remote> <branch>`
    PullFrom { remote: String, branch: String },
    /// `git fetch <remote> <branch>:<branch>`
    FetchBranch { remote: String, branch: String },
    /// `git push <remote> <branch>:<branch>`
    PushBranch { remote: String, branch: String },
    /// `git push --set-upstream <remote> <branch>`
    SetUpstream { remote: String, branch: String },
    /// `git merge <source> [-m <message> | --no-edit]`
    Merge {
        source: String,
        message: Option<String>,
    },
    /// `git tag -a <name> -m <message>`
    Tag { name: String, message: String },
    /// `git push`
    Push,
    /// `git push <remote> <tag>`
    PushTag { remote: String, tag: String },
    /// `git status`
    Status,
}

impl GitStep {
    /// Whether the step publishes anything to the remote
    pub fn is_push(&self) -> bool {
        matches!(
            self,
            Self::Push | Self::PushBranch { .. } | Self::PushTag { .. } | Self::SetUpstream { .. }
        )
    }

    /// Command-line arguments passed to git
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Checkout(branch) => owned(&["checkout", branch.as_str()]),
            Self::CheckoutNew(branch) => owned(&["checkout", "-b", branch.as_str()]),
            Self::Pull => owned(&["pull"]),
            Self::PullFrom { remote, branch } => owned(&["pull", remote.as_str(), branch.as_str()]),
            Self::FetchBranch { remote, branch } => {
                let refspec = format!("{branch}:{branch}");
                owned(&["fetch", remote.as_str(), refspec.as_str()])
            }
            Self::PushBranch { remote, branch } => {
                let refspec = format!("{branch}:{branch}");
                owned(&["push", remote.as_str(), refspec.as_str()])
            }
            Self::SetUpstream { remote, branch } => {
                owned(&["push", "--set-upstream", remote.as_str(), branch.as_str()])
            }
            Self::Merge { source, message } => match message {
                Some(message) => owned(&["merge", source.as_str(), "-m", message.as_str()]),
                None => owned(&["merge", source.as_str(), "--no-edit"]),
            },
            Self::Tag { name, message } => {
                owned(&["tag", "-a", name.as_str(), "-m", message.as_str()])
            }
            Self::Push => owned(&["push"]),
            Self::PushTag { remote, tag } => owned(&["push", remote.as_str(), tag.as_str()]),
            Self::Status => owned(&["status"]),
        }
    }
}

fn owned(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The tag message is multi-line; keep log lines readable.
            Self::Tag { name, .. } => write!(f, "git tag -a {name}"),
            _ => write!(f, "git {}", self.args().join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_args() {
        let step = GitStep::Merge {
            source: "feature/v1.2.0".to_string(),
            message: Some("build:release-v1.2.0-01".to_string()),
        };
        assert_eq!(
            step.args(),
            vec!["merge", "feature/v1.2.0", "-m", "build:release-v1.2.0-01"]
        );

        let step = GitStep::Merge {
            source: "feature/v1.2.0".to_string(),
            message: None,
        };
        assert_eq!(step.to_string(), "git merge feature/v1.2.0 --no-edit");
    }

    #[test]
    fn test_fetch_display() {
        let step = GitStep::FetchBranch {
            remote: "origin".to_string(),
            branch: "sit".to_string(),
        };
        assert_eq!(step.to_string(), "git fetch origin sit:sit");
        assert!(!step.is_push());
    }

    #[test]
    fn test_push_classification() {
        assert!(GitStep::Push.is_push());
        assert!(GitStep::SetUpstream {
            remote: "origin".to_string(),
            branch: "sit".to_string()
        }
        .is_push());
        assert!(!GitStep::Status.is_push());
    }
}
