//! Git hooks management command

use clap::{Args, Subcommand};
use console::style;
use tracing::info;

use launchpad_git::hooks;
use launchpad_git::GitRepo;

use crate::cli::{output, Cli};

/// Commit-msg hook management (install, uninstall, status)
#[derive(Debug, Args)]
pub struct HooksCommand {
    #[command(subcommand)]
    pub subcommand: HooksSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum HooksSubcommand {
    /// Install the commit-msg hook into .git/hooks/
    Install,
    /// Remove the launchpad-managed hook, restoring any previous one
    Uninstall,
    /// Show whether the hook is installed
    Status,
}

impl HooksCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let repo = GitRepo::discover(&std::env::current_dir()?)?;
        let git_dir = repo.git_dir();

        match self.subcommand {
            HooksSubcommand::Install => {
                info!("installing commit-msg hook");
                let path = hooks::install(git_dir)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Installed {} hook at {}",
                        style(hooks::HOOK_NAME).cyan(),
                        path.display()
                    ));
                }
            }
            HooksSubcommand::Uninstall => {
                info!("uninstalling commit-msg hook");
                let removed = hooks::uninstall(git_dir)?;
                if !cli.quiet {
                    if removed {
                        output::success("Uninstalled launchpad commit-msg hook");
                    } else {
                        output::warning("No launchpad-managed commit-msg hook found");
                    }
                }
            }
            HooksSubcommand::Status => {
                let status = hooks::status(git_dir);
                let state = if status.installed {
                    style("installed").green()
                } else {
                    style("not installed").red()
                };
                println!("{}", output::header("Git hooks"));
                println!("{}", output::key_value(hooks::HOOK_NAME, &state.to_string()));
                println!("{}", output::key_value("path", &status.path.display().to_string()));
                if status.has_backup {
                    println!("{}", output::key_value("backup", "previous hook saved"));
                }
            }
        }

        Ok(())
    }
}
