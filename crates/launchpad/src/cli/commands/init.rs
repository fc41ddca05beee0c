//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use launchpad_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use launchpad_git::{hooks, GitRepo};

use crate::cli::{output, Cli};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

/// Create a launchpad configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Also install the commit-msg hook
    #[arg(long)]
    pub hook: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let format = if self.toml {
            Format::Toml
        } else if self.yes {
            Format::Yaml
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            if selection == 1 {
                Format::Toml
            } else {
                Format::Yaml
            }
        };

        let config_path = output_path(config_path, format);
        std::fs::write(&config_path, render_template(format)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                style(config_path.display()).cyan()
            ));
        }

        let install_hook = self.hook
            || (!self.yes
                && Confirm::new()
                    .with_prompt("Install the commit-msg hook?")
                    .default(true)
                    .interact()?);
        if install_hook {
            self.install_hook(&cwd, cli);
        }

        if !cli.quiet {
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to match your branches", config_path.display());
            println!("  2. Run {} to cut a release", style("launchpad release").cyan());
        }

        Ok(())
    }

    fn install_hook(&self, cwd: &Path, cli: &Cli) {
        let result = GitRepo::discover(cwd)
            .map_err(anyhow::Error::from)
            .and_then(|repo| Ok(hooks::install(repo.git_dir())?));

        if cli.quiet {
            return;
        }
        match result {
            Ok(path) => {
                output::success(&format!("Installed commit-msg hook at {}", path.display()))
            }
            Err(e) => output::warning(&format!("Could not install the commit-msg hook: {e}")),
        }
    }
}

/// Swap a `.yaml` extension for `.toml` when writing TOML
fn output_path(path: PathBuf, format: Format) -> PathBuf {
    if format == Format::Toml && path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
        path.with_extension("toml")
    } else {
        path
    }
}

/// The commented YAML template, or its TOML rendering
fn render_template(format: Format) -> anyhow::Result<String> {
    match format {
        Format::Yaml => Ok(DEFAULT_CONFIG_TEMPLATE.to_string()),
        Format::Toml => {
            let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
            Ok(toml::to_string_pretty(&config)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_path_swaps_extension() {
        assert_eq!(
            output_path(PathBuf::from("launchpad.yaml"), Format::Toml),
            PathBuf::from("launchpad.toml")
        );
        assert_eq!(
            output_path(PathBuf::from("launchpad.yaml"), Format::Yaml),
            PathBuf::from("launchpad.yaml")
        );
    }

    #[test]
    fn test_toml_template_round_trips() {
        let rendered = render_template(Format::Toml).unwrap();
        let config: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.environments.production_fallback, "main");
        assert!(config.hooks.commit_msg.stamp_version);
    }
}
