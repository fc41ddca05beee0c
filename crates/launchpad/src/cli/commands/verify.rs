//! Commit message verification, run from the commit-msg hook

use std::path::{Path, PathBuf};

use clap::Args;
use console::{style, Style};
use thiserror::Error;
use tracing::{debug, info};

use launchpad_changelog::lint::{branch_version, classify, format_rules, stamp};
use launchpad_core::error::WorkflowError;
use launchpad_git::GitRepo;

use crate::cli::{load_project_config, output, Cli};

/// Environment variable husky-style hook runners use for the message file
pub const GIT_PARAMS_VAR: &str = "GIT_PARAMS";

/// The commit message did not match any accepted format.
///
/// Guidance has already been printed when this is returned.
#[derive(Debug, Error)]
#[error("commit message does not follow the required format")]
pub struct MessageRejected;

/// Check a commit message and stamp it with the branch version
#[derive(Debug, Default, Args)]
pub struct VerifyCommand {
    /// Commit message file (defaults to $GIT_PARAMS)
    pub file: Option<PathBuf>,
}

impl VerifyCommand {
    /// Execute the verify command
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        let path = self.message_file()?;
        info!(file = %path.display(), "verifying commit message");

        let cwd = std::env::current_dir()?;
        let config = load_project_config(&cwd, true)?;

        let branch = if config.hooks.commit_msg.stamp_version {
            match GitRepo::discover(&cwd) {
                Ok(repo) => repo.current_branch()?,
                Err(e) => {
                    debug!(error = %e, "not in a repository, skipping stamp");
                    None
                }
            }
        } else {
            None
        };

        rewrite_message_file(&path, branch.as_deref())
    }

    fn message_file(&self) -> Result<PathBuf, WorkflowError> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        std::env::var(GIT_PARAMS_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(WorkflowError::MissingMessageFile)
    }
}

/// Validate the message in `path` and stamp it when `branch` is known
fn rewrite_message_file(path: &Path, branch: Option<&str>) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)?;

    match verified_message(&raw, branch) {
        Ok(Some(stamped)) => {
            debug!(message = %stamped, "stamping commit message");
            std::fs::write(path, format!("{stamped}\n"))?;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(rejected) => {
            print_rejection(raw.trim());
            Err(rejected.into())
        }
    }
}

/// Check `raw` and return the stamped message when it has to change
fn verified_message(raw: &str, branch: Option<&str>) -> Result<Option<String>, MessageRejected> {
    let message = raw.trim();
    if classify(message).is_none() {
        return Err(MessageRejected);
    }

    let Some(branch) = branch else {
        return Ok(None);
    };
    let stamped = stamp(message, branch_version(branch));
    Ok((stamped != message).then_some(stamped))
}

fn print_rejection(message: &str) {
    let red = Style::new().on_red();
    eprintln!();
    eprintln!(
        "{} {}",
        output::badge("ERROR", red.clone()),
        style("Commit message does not follow the required format").red()
    );
    eprintln!();
    eprintln!("{}", output::badge("FORMAT", Style::new().on_blue()));
    for rule in format_rules() {
        eprintln!("  {}", style(rule.title).bold());
        eprintln!("    {}", style(&rule.format).green());
        eprintln!("    {}", style(format!("e.g. {}", rule.example)).dim());
    }
    eprintln!();
    eprintln!("{} {}", output::badge("MESSAGE", red), message);
    eprintln!();
}
