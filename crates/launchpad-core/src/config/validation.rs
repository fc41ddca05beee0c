//! Configuration validation

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::{Environment, EnvironmentConfig};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_environments(config)?;
    validate_release(config)?;
    validate_versions(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.trim().is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }

    Ok(())
}

fn validate_environments(config: &Config) -> Result<()> {
    let envs = EnvironmentConfig::from_config(&config.environments);
    let mut branches = HashSet::new();

    for &env in Environment::all() {
        let settings = envs.settings(env);
        if settings.branch.trim().is_empty() {
            return Err(invalid(
                format!("environments.{}.branch", env),
                "branch cannot be empty",
            )
            .into());
        }
        if settings.prefix.trim().is_empty() {
            return Err(invalid(
                format!("environments.{}.prefix", env),
                "prefix cannot be empty",
            )
            .into());
        }
        if !branches.insert(settings.branch.as_str()) {
            return Err(invalid(
                format!("environments.{}.branch", env),
                format!("branch '{}' is used by more than one environment", settings.branch),
            )
            .into());
        }
    }

    if config.environments.production_fallback.trim().is_empty() {
        return Err(invalid(
            "environments.production_fallback",
            "fallback branch cannot be empty",
        )
        .into());
    }

    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if let Err(e) = Regex::new(&config.release.source_pattern) {
        return Err(invalid("release.source_pattern", e.to_string()).into());
    }

    if config.release.downstream.contains(&Environment::Production) {
        return Err(invalid(
            "release.downstream",
            "production cannot be its own downstream",
        )
        .into());
    }

    Ok(())
}

fn validate_versions(config: &Config) -> Result<()> {
    if let Some(group) = &config.versions.group {
        if group.primary.trim().is_empty() {
            return Err(invalid("versions.group.primary", "primary package cannot be empty").into());
        }
    }

    if config.versions.next_tag.trim().is_empty() {
        return Err(invalid("versions.next_tag", "dist-tag cannot be empty").into());
    }

    Ok(())
}
