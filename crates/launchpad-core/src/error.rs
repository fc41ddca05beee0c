//! Error types for launchpad

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LaunchpadError
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Main error type for launchpad operations
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Git hook management errors
    #[error(transparent)]
    Hook(#[from] GitHookError),

    /// Package manager errors
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// The git executable could not be started
    #[error("Failed to run `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// A git command exited unsuccessfully
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Git hook installation errors
#[derive(Debug, Error)]
pub enum GitHookError {
    /// Hook could not be written
    #[error("Failed to install {hook} hook: {reason}")]
    InstallFailed { hook: String, reason: String },

    /// Hook could not be removed or restored
    #[error("Failed to uninstall {hook} hook: {reason}")]
    UninstallFailed { hook: String, reason: String },
}

/// Package manager errors
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Package manifest not found
    #[error("Package manifest not found at {0}")]
    ManifestNotFound(PathBuf),

    /// Failed to parse manifest
    #[error("Failed to parse manifest: {0}")]
    ManifestParseError(String),

    /// Command execution failed
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Commit message file could not be located
    #[error("No commit message file given and GIT_PARAMS is not set")]
    MissingMessageFile,

    /// Pre-condition not met
    #[error("Pre-condition not met: {0}")]
    PreConditionFailed(String),

    /// Required tool missing from PATH
    #[error("`{0}` was not found on PATH")]
    ToolNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err: LaunchpadError = GitError::CommandFailed {
            command: "git push".to_string(),
            stderr: "rejected".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "`git push` failed: rejected");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        };
        assert!(err.to_string().contains("git.remote"));
    }
}
