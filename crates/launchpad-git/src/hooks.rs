//! Commit-msg hook installation and management
//!
//! The managed hook delegates to `launchpad verify "$1"`, so every commit in
//! the repository is checked and stamped with the release version.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use launchpad_core::error::GitHookError;

/// Marker comment embedded in the generated hook script
const LAUNCHPAD_MARKER: &str = "# managed by launchpad, do not edit";

/// Name of the managed hook inside the hooks directory
pub const HOOK_NAME: &str = "commit-msg";

/// Status of the managed hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookStatus {
    pub installed: bool,
    pub has_backup: bool,
    pub path: PathBuf,
}

fn hook_script() -> String {
    format!(
        r#"#!/bin/sh
{LAUNCHPAD_MARKER}
exec launchpad verify "$1"
"#
    )
}

/// Check whether a file at `path` is a launchpad-managed hook
pub fn is_launchpad_hook(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(LAUNCHPAD_MARKER))
        .unwrap_or(false)
}

fn hook_path(git_dir: &Path) -> PathBuf {
    git_dir.join("hooks").join(HOOK_NAME)
}

/// Backup filename for an existing foreign hook
fn backup_path(hook_path: &Path) -> PathBuf {
    hook_path.with_file_name(format!("{HOOK_NAME}.pre-launchpad"))
}

fn install_error(reason: impl Into<String>) -> GitHookError {
    GitHookError::InstallFailed {
        hook: HOOK_NAME.to_string(),
        reason: reason.into(),
    }
}

fn uninstall_error(reason: impl Into<String>) -> GitHookError {
    GitHookError::UninstallFailed {
        hook: HOOK_NAME.to_string(),
        reason: reason.into(),
    }
}

/// Install the commit-msg hook into `<git_dir>/hooks/`.
///
/// A foreign hook already in place is moved aside and restored on uninstall.
pub fn install(git_dir: &Path) -> Result<PathBuf, GitHookError> {
    let path = hook_path(git_dir);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| install_error(e.to_string()))?;
    }

    if path.exists() && !is_launchpad_hook(&path) {
        let backup = backup_path(&path);
        info!(backup = %backup.display(), "backing up existing hook");
        fs::rename(&path, &backup)
            .map_err(|e| install_error(format!("failed to back up existing hook: {e}")))?;
    }

    fs::write(&path, hook_script()).map_err(|e| install_error(e.to_string()))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .map_err(|e| install_error(format!("failed to set permissions: {e}")))?;

    debug!(path = %path.display(), "installed hook");
    Ok(path)
}

/// Remove the managed hook, restoring a backup if present.
///
/// Returns `false` when there was nothing of ours to remove.
pub fn uninstall(git_dir: &Path) -> Result<bool, GitHookError> {
    let path = hook_path(git_dir);

    if !path.exists() {
        debug!("hook not installed, nothing to remove");
        return Ok(false);
    }

    if !is_launchpad_hook(&path) {
        warn!(path = %path.display(), "hook exists but is not managed by launchpad, skipping");
        return Ok(false);
    }

    fs::remove_file(&path).map_err(|e| uninstall_error(e.to_string()))?;

    let backup = backup_path(&path);
    if backup.exists() {
        info!("restoring pre-launchpad backup");
        fs::rename(&backup, &path)
            .map_err(|e| uninstall_error(format!("failed to restore backup: {e}")))?;
    }

    debug!("uninstalled hook");
    Ok(true)
}

/// Status of the managed hook
pub fn status(git_dir: &Path) -> HookStatus {
    let path = hook_path(git_dir);
    HookStatus {
        installed: path.exists() && is_launchpad_hook(&path),
        has_backup: backup_path(&path).exists(),
        path,
    }
}
