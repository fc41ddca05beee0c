//! Version-control seam used by the release workflow

use tracing::{info, instrument};

use launchpad_core::workflow::GitStep;

use crate::command::run_git;
use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, TagInfo};

/// Repository operations the release workflow depends on.
///
/// Implemented by [`GitRepo`]; tests substitute a recording fake.
pub trait Vcs {
    /// Local branch names
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Remote-tracking branch names (`<remote>/<branch>`)
    fn remote_branches(&self) -> Result<Vec<String>>;

    /// Current branch, `None` on a detached HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Most recently created tags, newest first
    fn recent_tags(&self, limit: usize) -> Result<Vec<TagInfo>>;

    /// Commits on HEAD whose subject contains `needle`
    fn commits_mentioning(&self, needle: &str) -> Result<Vec<CommitInfo>>;

    /// Execute a mutating step, returning its stdout
    fn apply(&self, step: &GitStep) -> Result<String>;
}

impl Vcs for GitRepo {
    fn local_branches(&self) -> Result<Vec<String>> {
        GitRepo::local_branches(self)
    }

    fn remote_branches(&self) -> Result<Vec<String>> {
        GitRepo::remote_branches(self)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        GitRepo::current_branch(self)
    }

    fn recent_tags(&self, limit: usize) -> Result<Vec<TagInfo>> {
        GitRepo::recent_tags(self, limit)
    }

    fn commits_mentioning(&self, needle: &str) -> Result<Vec<CommitInfo>> {
        GitRepo::commits_mentioning(self, needle)
    }

    #[instrument(skip(self), fields(step = %step))]
    fn apply(&self, step: &GitStep) -> Result<String> {
        info!(step = %step, "applying git step");
        run_git(self.path(), &step.args())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::init_repo;

    #[test]
    fn test_apply_creates_and_switches_branch() {
        let (temp, _raw) = init_repo();
        let repo = GitRepo::open(temp.path()).unwrap();

        repo.apply(&GitStep::CheckoutNew("feature/v1.2.0".to_string()))
            .unwrap();
        assert_eq!(
            Vcs::current_branch(&repo).unwrap().as_deref(),
            Some("feature/v1.2.0")
        );

        let status = repo.apply(&GitStep::Status).unwrap();
        assert!(status.contains("feature/v1.2.0"));
    }

    #[test]
    fn test_apply_tag_is_visible_to_reads() {
        let (temp, _raw) = init_repo();
        let repo = GitRepo::open(temp.path()).unwrap();

        // `git tag -a` needs an identity even when the global config has none
        run_git(
            temp.path(),
            &["config".to_string(), "user.name".to_string(), "Bot".to_string()],
        )
        .unwrap();
        run_git(
            temp.path(),
            &[
                "config".to_string(),
                "user.email".to_string(),
                "bot@example.com".to_string(),
            ],
        )
        .unwrap();

        repo.apply(&GitStep::Tag {
            name: "sit-v1.2.0-01".to_string(),
            message: "Version:v1.2.0\nSummary:add login".to_string(),
        })
        .unwrap();

        let tags = Vcs::recent_tags(&repo, 10).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "sit-v1.2.0-01");
        assert_eq!(
            tags[0].message.as_deref(),
            Some("Version:v1.2.0\nSummary:add login")
        );
    }
}
