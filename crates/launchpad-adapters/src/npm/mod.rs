//! npm command-line adapter

mod manifest;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use launchpad_core::error::{AdapterError, Result};
use tracing::{info, instrument};

use crate::traits::PackageManager;
use crate::versions::DependencyKind;
pub use manifest::PackageJson;

/// Runs `npm` in a project directory
pub struct NpmCli {
    project_dir: PathBuf,
}

impl NpmCli {
    /// Create an adapter rooted at `project_dir`
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Project directory holding package.json
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

impl PackageManager for NpmCli {
    fn name(&self) -> &'static str {
        "npm"
    }

    #[instrument(skip(self))]
    fn view_version(&self, spec: &str) -> Result<String> {
        let command = format!("npm view {spec} version");
        let start = Instant::now();
        let output = Command::new("npm")
            .args(["view", spec, "version"])
            .current_dir(&self.project_dir)
            .output()
            .map_err(|e| AdapterError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        info!(
            spec,
            duration_ms = start.elapsed().as_millis(),
            success = output.status.success(),
            "npm view"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdapterError::CommandFailed {
                command,
                reason: stderr.trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    #[instrument(skip(self), fields(count = specs.len()))]
    fn install(&self, specs: &[String], kind: DependencyKind) -> Result<()> {
        let command = format!("npm install {} {}", specs.join(" "), kind.flag());
        let start = Instant::now();

        // Installs stream their progress straight to the terminal
        let status = Command::new("npm")
            .arg("install")
            .args(specs)
            .arg(kind.flag())
            .current_dir(&self.project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| AdapterError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        info!(
            command = %command,
            duration_ms = start.elapsed().as_millis(),
            success = status.success(),
            "npm install"
        );

        if !status.success() {
            return Err(AdapterError::CommandFailed {
                command,
                reason: format!("exited with {status}"),
            }
            .into());
        }

        Ok(())
    }
}
