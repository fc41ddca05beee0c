//! Branch listing

use git2::BranchType;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Local branch names
    #[instrument(skip(self))]
    pub fn local_branches(&self) -> Result<Vec<String>> {
        self.branch_names(BranchType::Local)
    }

    /// Remote-tracking branch names, e.g. `origin/sit`.
    ///
    /// Symbolic `<remote>/HEAD` refs are skipped.
    #[instrument(skip(self))]
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        self.branch_names(BranchType::Remote)
    }

    fn branch_names(&self, kind: BranchType) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(kind))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                if !name.ends_with("/HEAD") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        debug!(kind = ?kind, count = names.len(), "listed branches");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::init_repo;

    #[test]
    fn test_local_branches() {
        let (temp, raw) = init_repo();
        let head = raw.head().unwrap().peel_to_commit().unwrap();
        raw.branch("feature/v1.2.0", &head, false).unwrap();
        raw.branch("sit", &head, false).unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        let branches = repo.local_branches().unwrap();
        assert!(branches.contains(&"feature/v1.2.0".to_string()));
        assert!(branches.contains(&"sit".to_string()));
    }

    #[test]
    fn test_remote_branches_skip_head() {
        let (temp, raw) = init_repo();
        let head = raw.head().unwrap().target().unwrap();
        raw.reference("refs/remotes/origin/sit", head, true, "test")
            .unwrap();
        raw.reference_symbolic(
            "refs/remotes/origin/HEAD",
            "refs/remotes/origin/sit",
            true,
            "test",
        )
        .unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.remote_branches().unwrap(), vec!["origin/sit"]);
    }
}
