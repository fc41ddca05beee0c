//! Git CLI invocation

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::repository::Result;
use launchpad_core::error::GitError;

/// Run `git <args>` in `workdir` and return its stdout.
///
/// Stderr of a failed command is carried in [`GitError::CommandFailed`].
#[instrument(skip(args), fields(command = tracing::field::Empty))]
pub fn run_git(workdir: &Path, args: &[String]) -> Result<String> {
    let command = format!("git {}", args.join(" "));
    tracing::Span::current().record("command", command.as_str());

    let start = Instant::now();
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|e| GitError::SpawnFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    info!(
        command = %command,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git (CLI)"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::CommandFailed { command, stderr });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    debug!(bytes = stdout.len(), "git output");
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::init_repo;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_git_status() {
        let (temp, _raw) = init_repo();
        let out = run_git(temp.path(), &args(&["status", "--porcelain"])).unwrap();
        assert!(out.trim().is_empty());
    }

    #[test]
    fn test_run_git_failure_carries_stderr() {
        let (temp, _raw) = init_repo();
        let err = run_git(temp.path(), &args(&["checkout", "no-such-branch"])).unwrap_err();
        match err {
            GitError::CommandFailed { command, stderr } => {
                assert_eq!(command, "git checkout no-such-branch");
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
