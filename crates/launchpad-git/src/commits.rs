//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Commits reachable from HEAD whose subject line contains `needle`,
    /// newest first. Bodies are not searched. An unborn HEAD yields no
    /// commits.
    #[instrument(skip(self))]
    pub fn commits_mentioning(&self, needle: &str) -> Result<Vec<CommitInfo>> {
        let head = match self.repo.head() {
            Ok(head) => head.peel_to_commit()?,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.summary().is_some_and(|s| s.contains(needle)) {
                commits.push(commit_to_info(&commit));
            }
        }

        debug!(needle, count = commits.len(), "collected commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let message = commit.summary().unwrap_or_default().to_string();

    // Committer date: the time the commit landed on the branch
    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or(chrono::DateTime::<Utc>::UNIX_EPOCH);

    let info = CommitInfo::new(
        commit.id().to_string(),
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or_default(),
        timestamp,
    );

    match commit.body() {
        Some(body) => info.with_body(body),
        None => info,
    }
}
