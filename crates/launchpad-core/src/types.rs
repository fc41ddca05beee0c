//! Core types for launchpad

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EnvironmentsConfig;

/// Deployment target a release can be merged into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Day-to-day integration branch, merged without a tag
    Development,
    /// Staging / system integration testing
    Sit,
    /// Canary rollout
    Beta,
    /// Live environment
    Production,
}

impl Environment {
    /// All environments, in the order they are offered to the user
    pub fn all() -> &'static [Environment] {
        &[
            Environment::Development,
            Environment::Sit,
            Environment::Beta,
            Environment::Production,
        ]
    }

    /// Returns the string representation of the environment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Sit => "sit",
            Self::Beta => "beta",
            Self::Production => "production",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Development => 0,
            Self::Sit => 1,
            Self::Beta => 2,
            Self::Production => 3,
        }
    }

    /// Built-in branch, tag prefix and label
    pub fn default_settings(&self) -> EnvironmentSettings {
        let (branch, prefix, label) = match self {
            Self::Development => ("develop", "dev", "development"),
            Self::Sit => ("sit", "sit", "testing"),
            Self::Beta => ("product", "release", "canary"),
            Self::Production => ("master", "release", "production"),
        };
        EnvironmentSettings {
            branch: branch.to_string(),
            prefix: prefix.to_string(),
            label: label.to_string(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" | "develop" => Ok(Self::Development),
            "sit" | "staging" | "test" => Ok(Self::Sit),
            "beta" | "canary" => Ok(Self::Beta),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

/// Branch, tag prefix and display label of one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// Branch receiving the merge
    pub branch: String,
    /// Prefix of release tags cut for this environment
    pub prefix: String,
    /// Human readable name
    pub label: String,
}

/// Resolved environment-to-branch mapping for one run.
///
/// Built once from configuration, then finalised by
/// [`EnvironmentConfig::resolve_production`]. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    settings: [EnvironmentSettings; 4],
}

impl EnvironmentConfig {
    /// Build the mapping from configuration overrides
    pub fn from_config(config: &EnvironmentsConfig) -> Self {
        let settings = [
            Environment::Development,
            Environment::Sit,
            Environment::Beta,
            Environment::Production,
        ]
        .map(|env| {
            let mut settings = env.default_settings();
            let overrides = config.get(env);
            if let Some(branch) = &overrides.branch {
                settings.branch = branch.clone();
            }
            if let Some(prefix) = &overrides.prefix {
                settings.prefix = prefix.clone();
            }
            if let Some(label) = &overrides.label {
                settings.label = label.clone();
            }
            settings
        });

        Self { settings }
    }

    /// Rebind the production branch to `fallback` when the remote only has
    /// the fallback branch (typically `main` instead of `master`).
    ///
    /// `remote_branches` are remote-tracking names such as `origin/main`.
    pub fn resolve_production(self, remote_branches: &[String], fallback: &str) -> Self {
        let configured = self.branch(Environment::Production).to_string();
        let names: Vec<&str> = remote_branches
            .iter()
            .map(|b| b.split_once('/').map_or(b.as_str(), |(_, name)| name))
            .collect();

        let has_configured = names.iter().any(|n| *n == configured);
        let has_fallback = names.iter().any(|n| *n == fallback);

        if has_fallback && !has_configured {
            info!(from = %configured, to = fallback, "rebinding production branch");
            let mut settings = self.settings;
            settings[Environment::Production.index()].branch = fallback.to_string();
            return Self { settings };
        }

        self
    }

    /// Settings of an environment
    pub fn settings(&self, env: Environment) -> &EnvironmentSettings {
        &self.settings[env.index()]
    }

    /// Branch of an environment
    pub fn branch(&self, env: Environment) -> &str {
        &self.settings(env).branch
    }

    /// Tag prefix of an environment
    pub fn prefix(&self, env: Environment) -> &str {
        &self.settings(env).prefix
    }

    /// Display label of an environment
    pub fn label(&self, env: Environment) -> &str {
        &self.settings(env).label
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::from_config(&EnvironmentsConfig::default())
    }
}

/// What is being released and where to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
    /// Feature branch being released
    pub source: String,
    /// Environment receiving the merge
    pub target: Environment,
}

impl ReleaseState {
    /// Create a new release state
    pub fn new(source: impl Into<String>, target: Environment) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }

    /// Version token of the source branch (its last path segment)
    pub fn version(&self) -> &str {
        self.source.rsplit('/').next().unwrap_or(&self.source)
    }

    /// Version as it appears in tag names, always `v`-prefixed
    pub fn tag_version(&self) -> String {
        let version = self.version();
        if version.starts_with('v') || version.starts_with('V') {
            version.to_string()
        } else {
            format!("v{}", version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remotes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_mapping() {
        let envs = EnvironmentConfig::default();
        assert_eq!(envs.branch(Environment::Development), "develop");
        assert_eq!(envs.branch(Environment::Beta), "product");
        assert_eq!(envs.prefix(Environment::Beta), "release");
        assert_eq!(envs.prefix(Environment::Production), "release");
        assert_eq!(envs.prefix(Environment::Sit), "sit");
    }

    #[test]
    fn test_resolve_production_to_main() {
        let envs = EnvironmentConfig::default()
            .resolve_production(&remotes(&["origin/main", "origin/develop"]), "main");
        assert_eq!(envs.branch(Environment::Production), "main");
    }

    #[test]
    fn test_resolve_keeps_master_when_present() {
        let envs = EnvironmentConfig::default()
            .resolve_production(&remotes(&["origin/main", "origin/master"]), "main");
        assert_eq!(envs.branch(Environment::Production), "master");
    }

    #[test]
    fn test_resolve_without_main() {
        let envs =
            EnvironmentConfig::default().resolve_production(&remotes(&["origin/sit"]), "main");
        assert_eq!(envs.branch(Environment::Production), "master");
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = EnvironmentsConfig::default();
        config.sit.branch = Some("staging".to_string());
        config.sit.label = Some("staging".to_string());
        let envs = EnvironmentConfig::from_config(&config);
        assert_eq!(envs.branch(Environment::Sit), "staging");
        assert_eq!(envs.prefix(Environment::Sit), "sit");
        assert_eq!(envs.label(Environment::Sit), "staging");
    }

    #[test]
    fn test_release_state_version() {
        let state = ReleaseState::new("feature/v1.2.0", Environment::Production);
        assert_eq!(state.version(), "v1.2.0");
        assert_eq!(state.tag_version(), "v1.2.0");

        let state = ReleaseState::new("feature/1.2.0", Environment::Sit);
        assert_eq!(state.version(), "1.2.0");
        assert_eq!(state.tag_version(), "v1.2.0");
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("canary".parse::<Environment>().unwrap(), Environment::Beta);
        assert!("qa-cluster".parse::<Environment>().is_err());
    }
}
