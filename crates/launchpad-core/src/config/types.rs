//! Configuration types

use serde::{Deserialize, Serialize};

use crate::types::Environment;

/// Main configuration for launchpad
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Git configuration
    pub git: GitConfig,

    /// Environment branch/prefix overrides
    pub environments: EnvironmentsConfig,

    /// Release workflow configuration
    pub release: ReleaseConfig,

    /// npm version checker configuration
    pub versions: VersionsConfig,

    /// Git hook configuration
    pub hooks: HooksConfig,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

/// Optional overrides for one environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentOverride {
    /// Branch name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Tag prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Environment overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentsConfig {
    pub development: EnvironmentOverride,
    pub sit: EnvironmentOverride,
    pub beta: EnvironmentOverride,
    pub production: EnvironmentOverride,

    /// Production branch used when the remote has it but not the configured one
    pub production_fallback: String,
}

impl EnvironmentsConfig {
    /// Overrides for an environment
    pub fn get(&self, env: Environment) -> &EnvironmentOverride {
        match env {
            Environment::Development => &self.development,
            Environment::Sit => &self.sit,
            Environment::Beta => &self.beta,
            Environment::Production => &self.production,
        }
    }
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            development: EnvironmentOverride::default(),
            sit: EnvironmentOverride::default(),
            beta: EnvironmentOverride::default(),
            production: EnvironmentOverride::default(),
            production_fallback: "main".to_string(),
        }
    }
}

/// Release workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Pattern a local branch must match to be offered as a release source
    pub source_pattern: String,

    /// Environments forward-merged after a production release
    pub downstream: Vec<Environment>,

    /// Ticket id suggested when no commit carries one
    pub default_ticket_id: String,

    /// Summary suggested when no ticketed commit exists
    pub default_summary: String,

    /// Where to go to deploy a pushed tag, printed after tagging
    pub publish_hint: Option<String>,

    /// Workflow variant switches
    pub policy: ReleasePolicy,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            source_pattern: r"^feature/+[0-9,vV.]+$".to_string(),
            downstream: vec![
                Environment::Beta,
                Environment::Sit,
                Environment::Development,
            ],
            default_ticket_id: "0000000".to_string(),
            default_summary: "Feature improvements and code updates".to_string(),
            publish_hint: None,
            policy: ReleasePolicy::default(),
        }
    }
}

/// Behaviour switches distinguishing the known workflow variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasePolicy {
    /// Show the author column in the commit review table
    pub include_author: bool,

    /// Ask for a description appended to SIT tag names
    pub sit_description_suffix: bool,

    /// Ask before pushing a SIT release
    pub confirm_sit_push: bool,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            include_author: true,
            sit_description_suffix: false,
            confirm_sit_push: false,
        }
    }
}

/// npm version checker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Packages released together, driven by one primary package
    pub group: Option<PackageGroup>,

    /// Packages compared against their own latest release
    pub standalone: Vec<String>,

    /// Registry dist-tag used for prereleases
    pub next_tag: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            group: None,
            standalone: Vec::new(),
            next_tag: "next".to_string(),
        }
    }
}

/// Packages sharing one version line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageGroup {
    /// Package whose registry versions are authoritative
    pub primary: String,

    /// All managed packages (may include the primary)
    #[serde(default)]
    pub members: Vec<String>,
}

/// Git hook configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// commit-msg hook settings
    pub commit_msg: CommitMsgHookConfig,
}

/// commit-msg hook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitMsgHookConfig {
    /// Prefix accepted messages with `[<branch version>] `
    pub stamp_version: bool,
}

impl Default for CommitMsgHookConfig {
    fn default() -> Self {
        Self {
            stamp_version: true,
        }
    }
}
