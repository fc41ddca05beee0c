//! CLI definition and command handling

pub mod commands;
pub mod output;
pub mod prompt;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use launchpad_core::config::{find_config, load_config, Config};
use launchpad_core::error::WorkflowError;

use commands::{
    CheckCommand, CompletionsCommand, HooksCommand, InitCommand, ReleaseCommand, VerifyCommand,
    VersionCommand,
};

/// Environment variable npm sets to the name of the running script
pub const LIFECYCLE_EVENT_VAR: &str = "npm_lifecycle_event";

/// Launchpad - Git-flow release automation CLI
#[derive(Debug, Parser)]
#[command(name = "launchpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug logs on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Command to run; when omitted, chosen by the npm script name
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a launchpad configuration file
    Init(InitCommand),

    /// Merge a feature branch into an environment branch and tag it
    Release(ReleaseCommand),

    /// Check a commit message and stamp it with the branch version
    Verify(VerifyCommand),

    /// Compare managed npm packages with the registry and offer updates
    Check(CheckCommand),

    /// Move all managed npm packages to a chosen version
    Version(VersionCommand),

    /// Manage the commit-msg git hook
    Hooks(HooksCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Command selected by an npm lifecycle event name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Verify,
    Release,
    Check,
    Version,
}

impl LifecycleCommand {
    /// Map an npm script name; unknown names select nothing
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            "verify" => Some(Self::Verify),
            "release" => Some(Self::Release),
            "check" => Some(Self::Check),
            "version" => Some(Self::Version),
            _ => None,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Some(Commands::Init(ref cmd)) => cmd.execute(&self),
            Some(Commands::Release(ref cmd)) => cmd.execute(&self),
            Some(Commands::Verify(ref cmd)) => cmd.execute(&self),
            Some(Commands::Check(ref cmd)) => cmd.execute(&self),
            Some(Commands::Version(ref cmd)) => cmd.execute(&self),
            Some(Commands::Hooks(ref cmd)) => cmd.execute(&self),
            Some(Commands::Completions(ref cmd)) => cmd.execute(&self),
            None => self.execute_lifecycle(),
        }
    }

    fn execute_lifecycle(&self) -> anyhow::Result<()> {
        let event = std::env::var(LIFECYCLE_EVENT_VAR).unwrap_or_default();
        let Some(command) = LifecycleCommand::from_event(&event) else {
            debug!(event = %event, "no command for lifecycle event");
            return Ok(());
        };

        info!(event = %event, "dispatching lifecycle event");
        match command {
            LifecycleCommand::Verify => VerifyCommand::default().execute(self),
            LifecycleCommand::Release => ReleaseCommand::default().execute(self),
            LifecycleCommand::Check => CheckCommand::default().execute(self),
            LifecycleCommand::Version => VersionCommand::default().execute(self),
        }
    }
}

/// Load the nearest configuration file, or defaults when there is none.
///
/// A configuration file that exists but fails to parse or validate is an
/// error rather than a silent fallback.
pub fn load_project_config(dir: &Path, quiet: bool) -> anyhow::Result<Config> {
    match find_config(dir) {
        Some(path) => {
            debug!(path = %path.display(), "using configuration");
            Ok(load_config(&path)?)
        }
        None => {
            if !quiet {
                output::warning(&format!(
                    "No configuration found, using defaults. Run {} to create one.",
                    console::style("launchpad init").cyan()
                ));
            }
            Ok(Config::default())
        }
    }
}

/// Fail early when an external tool is missing from PATH
pub fn require_tool(name: &str) -> anyhow::Result<PathBuf> {
    which::which(name).map_err(|_| WorkflowError::ToolNotFound(name.to_string()).into())
}
