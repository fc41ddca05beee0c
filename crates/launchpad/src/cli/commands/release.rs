//! Release command

use clap::Args;
use console::style;
use tracing::info;

use launchpad_git::GitRepo;

use crate::cli::prompt::DialoguerPrompter;
use crate::cli::{load_project_config, require_tool, Cli};
use crate::release::{Gate, Outcome, ReleaseRun};

/// Merge a release branch into an environment branch and tag it
#[derive(Debug, Default, Args)]
pub struct ReleaseCommand {}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing release command");
        require_tool("git")?;

        let cwd = std::env::current_dir()?;
        let repo = GitRepo::discover(&cwd)?;
        let config = load_project_config(repo.path(), cli.quiet)?;
        let prompter = DialoguerPrompter;

        let outcome = ReleaseRun::new(&repo, &prompter, &config).run()?;
        info!(outcome = ?outcome, "release command finished");

        match outcome {
            Outcome::NoCandidates | Outcome::Merged { .. } => {}
            Outcome::Declined(gate) => {
                let stage = match gate {
                    Gate::PublishSource => "before publishing the source branch",
                    Gate::CreateTarget => "before creating the target branch",
                    Gate::ReviewCommits => "after reviewing commits",
                };
                println!("{} {}", style("Release cancelled").yellow(), stage);
            }
        }

        Ok(())
    }
}
