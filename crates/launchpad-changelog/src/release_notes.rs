//! Commit selection and ticket aggregation for a release

use chrono::{DateTime, Utc};
use launchpad_git::CommitInfo;
use tracing::{debug, instrument};

use crate::parser::{CommitParser, ReleaseCommitParser};
use crate::types::{CommitType, ReleaseCommit};

/// Parse commits and keep those committed strictly after `since`.
///
/// Unparseable commits are dropped. Without a cutoff every parsed commit is
/// kept.
#[instrument(skip(commits), fields(commit_count = commits.len()))]
pub fn commits_after(commits: &[CommitInfo], since: Option<DateTime<Utc>>) -> Vec<ReleaseCommit> {
    let parser = ReleaseCommitParser::new();
    let selected: Vec<ReleaseCommit> = commits
        .iter()
        .filter_map(|c| parser.parse(c))
        .filter(|c| since.map_or(true, |cutoff| c.timestamp > cutoff))
        .collect();
    debug!(selected = selected.len(), "selected release commits");
    selected
}

/// Ticket ids and summary derived from the commits of a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseNotes {
    /// Tickets of `feat` commits, comma-joined
    pub feature_ids: Option<String>,
    /// Tickets of `fix` commits, comma-joined
    pub bug_ids: Option<String>,
    /// Descriptions of ticketed commits, comma-joined
    pub summary: Option<String>,
}

impl ReleaseNotes {
    /// Aggregate tickets and summary in commit order
    pub fn from_commits(commits: &[ReleaseCommit]) -> Self {
        let ids = |ty: CommitType| {
            let joined = commits
                .iter()
                .filter(|c| c.commit_type == ty)
                .filter_map(|c| c.ticket.as_deref().filter(|t| !t.is_empty()))
                .collect::<Vec<_>>()
                .join(",");
            (!joined.is_empty()).then_some(joined)
        };

        let summary = commits
            .iter()
            .filter(|c| c.has_ticket())
            .map(|c| c.description.as_str())
            .collect::<Vec<_>>()
            .join(",");

        Self {
            feature_ids: ids(CommitType::Feat),
            bug_ids: ids(CommitType::Fix),
            summary: (!summary.is_empty()).then_some(summary),
        }
    }

    /// Whether any feature or bug id was found
    pub fn has_ids(&self) -> bool {
        self.feature_ids.is_some() || self.bug_ids.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(message: &str, seconds: i64) -> CommitInfo {
        CommitInfo::new(
            "abc1234567890",
            message,
            "Dev",
            "dev@example.com",
            Utc.timestamp_opt(seconds, 0).unwrap(),
        )
    }

    #[test]
    fn test_commits_after_cutoff() {
        let commits = vec![
            commit("[v1.2.0] feat(1001): add login", 300),
            commit("[v1.2.0] fix(2002): header overlap", 200),
            commit("[v1.2.0] not a release commit", 250),
            commit("[v1.2.0] docs: readme", 100),
        ];
        let cutoff = Utc.timestamp_opt(200, 0).unwrap();

        let selected = commits_after(&commits, Some(cutoff));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].description, "add login");

        assert_eq!(commits_after(&commits, None).len(), 3);
    }

    #[test]
    fn test_nothing_new_since_tag() {
        let commits = vec![commit("[v1.2.0] feat(1001): add login", 100)];
        let cutoff = Utc.timestamp_opt(100, 0).unwrap();
        assert!(commits_after(&commits, Some(cutoff)).is_empty());
    }

    #[test]
    fn test_release_notes_aggregation() {
        let commits = commits_after(
            &[
                commit("[v1.2.0] feat(1001): add login", 1),
                commit("[v1.2.0] fix(2002): header overlap", 2),
                commit("[v1.2.0] feat(1003,1004): export csv", 3),
                commit("[v1.2.0] refactor: tidy", 4),
                commit("[v1.2.0] docs(5005): api docs", 5),
            ],
            None,
        );

        let notes = ReleaseNotes::from_commits(&commits);
        assert_eq!(notes.feature_ids.as_deref(), Some("1001,1003,1004"));
        assert_eq!(notes.bug_ids.as_deref(), Some("2002"));
        assert_eq!(
            notes.summary.as_deref(),
            Some("add login,header overlap,export csv,api docs")
        );
        assert!(notes.has_ids());
    }

    #[test]
    fn test_release_notes_without_tickets() {
        let commits = commits_after(&[commit("[v1.2.0] feat: untracked", 1)], None);
        let notes = ReleaseNotes::from_commits(&commits);
        assert_eq!(notes, ReleaseNotes::default());
        assert!(!notes.has_ids());
    }
}
