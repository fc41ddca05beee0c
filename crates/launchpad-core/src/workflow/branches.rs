//! Source and target branch decisions

use regex::Regex;
use tracing::debug;

use super::step::GitStep;

/// Strip the `* ` current-branch marker and surrounding whitespace
pub fn normalize_branch_name(raw: &str) -> &str {
    raw.trim().trim_start_matches("* ").trim()
}

/// Local branches eligible as release sources, in listing order
pub fn source_candidates(local_branches: &[String], pattern: &Regex) -> Vec<String> {
    let candidates: Vec<String> = local_branches
        .iter()
        .map(|b| normalize_branch_name(b))
        .filter(|b| pattern.is_match(b))
        .map(str::to_string)
        .collect();
    debug!(count = candidates.len(), "release source candidates");
    candidates
}

/// Whether `branch` has a remote-tracking ref on `remote`
pub fn exists_on_remote(remote_branches: &[String], remote: &str, branch: &str) -> bool {
    let wanted = format!("{remote}/{branch}");
    remote_branches
        .iter()
        .any(|b| normalize_branch_name(b) == wanted)
}

/// Whether `branch` exists locally
pub fn exists_locally(local_branches: &[String], branch: &str) -> bool {
    local_branches
        .iter()
        .any(|b| normalize_branch_name(b) == branch)
}

/// What to do before a source branch can be released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePlan {
    /// Already on the remote
    Ready,
    /// Must be pushed first; needs the user's consent
    Publish(Vec<GitStep>),
}

/// Decide whether the source branch needs publishing
pub fn plan_source(source: &str, remote: &str, remote_branches: &[String]) -> SourcePlan {
    if exists_on_remote(remote_branches, remote, source) {
        return SourcePlan::Ready;
    }

    SourcePlan::Publish(vec![
        GitStep::PushBranch {
            remote: remote.to_string(),
            branch: source.to_string(),
        },
        GitStep::SetUpstream {
            remote: remote.to_string(),
            branch: source.to_string(),
        },
    ])
}

/// What to do before a target branch can receive the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPlan {
    /// Exists locally and remotely
    Ready,
    /// Missing on the remote: branch off production and publish; needs consent
    Create(Vec<GitStep>),
    /// On the remote only: fetch into a local tracking branch
    Track(Vec<GitStep>),
}

/// Decide how to make the target branch available
pub fn plan_target(
    target: &str,
    remote: &str,
    local_branches: &[String],
    remote_branches: &[String],
    production_branch: &str,
) -> TargetPlan {
    let upstream = GitStep::SetUpstream {
        remote: remote.to_string(),
        branch: target.to_string(),
    };

    if !exists_on_remote(remote_branches, remote, target) {
        return TargetPlan::Create(vec![
            GitStep::Checkout(production_branch.to_string()),
            GitStep::Pull,
            GitStep::CheckoutNew(target.to_string()),
            GitStep::PushBranch {
                remote: remote.to_string(),
                branch: target.to_string(),
            },
            upstream,
        ]);
    }

    if exists_locally(local_branches, target) {
        return TargetPlan::Ready;
    }

    TargetPlan::Track(vec![
        GitStep::FetchBranch {
            remote: remote.to_string(),
            branch: target.to_string(),
        },
        upstream,
    ])
}
