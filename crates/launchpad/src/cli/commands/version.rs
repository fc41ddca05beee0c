//! Version command - move every managed npm package to one version

use std::path::Path;

use clap::Args;
use tracing::info;

use launchpad_adapters::versions::{
    install_all, installed_packages, is_valid_custom_version, mark_updates, registry_versions,
};
use launchpad_adapters::{NpmCli, PackageManager};
use launchpad_core::config::PackageGroup;
use launchpad_core::error::WorkflowError;

use super::check::package_table;
use crate::cli::prompt::{DialoguerPrompter, Prompter};
use crate::cli::{load_project_config, output, require_tool, Cli};

/// Move all managed npm packages to a chosen version
#[derive(Debug, Default, Args)]
pub struct VersionCommand {}

impl VersionCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing version command");
        require_tool("npm")?;

        let cwd = std::env::current_dir()?;
        let config = load_project_config(&cwd, cli.quiet)?;
        let group = config.versions.group.as_ref().ok_or_else(|| {
            WorkflowError::PreConditionFailed(
                "no package group configured under `versions.group`".to_string(),
            )
        })?;

        let npm = NpmCli::new(&cwd);
        let version = pin_group(&npm, &DialoguerPrompter, &cwd, group, &config.versions.next_tag)?;
        if let Some(version) = version {
            output::success(&format!("Installed {version}"));
        }
        Ok(())
    }
}

/// Ask for a version and install every declared group member at it.
///
/// Returns the installed version, `None` when no member is declared.
fn pin_group(
    manager: &dyn PackageManager,
    prompter: &dyn Prompter,
    project_dir: &Path,
    group: &PackageGroup,
    next_tag: &str,
) -> anyhow::Result<Option<String>> {
    let mut packages = installed_packages(project_dir, &group.members)?;
    if packages.is_empty() {
        output::warning("None of the managed packages is declared in package.json");
        return Ok(None);
    }

    let spinner = output::spinner(&format!("Looking up {} on the registry", group.primary));
    let registry = registry_versions(manager, &group.primary, next_tag);
    spinner.finish_and_clear();
    let registry = registry?;

    mark_updates(&mut packages, &registry.latest);
    println!("{}", package_table(&packages, &registry.latest));

    let mut choices = vec![(
        format!("latest ({})", registry.latest),
        Some(registry.latest.clone()),
    )];
    if !registry.next.is_empty() {
        choices.push((format!("{next_tag} ({})", registry.next), Some(registry.next.clone())));
    }
    choices.push(("custom".to_string(), None));

    let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();
    let index = prompter.select("Version to install", &labels, 0)?;
    let chosen = choices
        .into_iter()
        .nth(index)
        .and_then(|(_, version)| version);

    let version = match chosen {
        Some(version) => version,
        None => prompter.input("Version (x.y.z)", &registry.latest, &|input: &str| {
            if is_valid_custom_version(input) {
                Ok(())
            } else {
                Err("expected a version such as 1.4.0".to_string())
            }
        })?,
    };

    info!(version = %version, count = packages.len(), "installing group");
    install_all(manager, &packages, &version)?;
    Ok(Some(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    use launchpad_adapters::DependencyKind;

    use crate::cli::commands::check::tests::{group, project, Answers, StubNpm};

    fn registry() -> StubNpm {
        StubNpm {
            published: HashMap::from([
                ("ui".to_string(), "2.1.0".to_string()),
                ("ui@next".to_string(), "2.2.0-beta.1".to_string()),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_pin_to_next_installs_every_member() {
        let dir = project("2.1.0", "2.1.0", &[("ui", "2.1.0"), ("ui-cli", "2.1.0")]);
        let npm = registry();
        let answers = Answers {
            selects: RefCell::new(VecDeque::from([1])),
            ..Default::default()
        };

        let version = pin_group(&npm, &answers, dir.path(), &group(), "next").unwrap();
        assert_eq!(version.as_deref(), Some("2.2.0-beta.1"));
        assert_eq!(
            npm.installs.borrow().as_slice(),
            &[
                (vec!["ui@2.2.0-beta.1".to_string()], DependencyKind::Dependencies),
                (vec!["ui-cli@2.2.0-beta.1".to_string()], DependencyKind::DevDependencies),
            ]
        );
    }

    #[test]
    fn test_custom_version_is_validated() {
        let dir = project("2.1.0", "2.1.0", &[]);
        let npm = registry();
        let answers = Answers {
            selects: RefCell::new(VecDeque::from([2])),
            inputs: RefCell::new(VecDeque::from(["banana".to_string(), "1.9.3".to_string()])),
            ..Default::default()
        };

        let version = pin_group(&npm, &answers, dir.path(), &group(), "next").unwrap();
        assert_eq!(version.as_deref(), Some("1.9.3"));
        assert_eq!(npm.installs.borrow()[0].0, vec!["ui@1.9.3".to_string()]);
    }

    #[test]
    fn test_missing_next_tag_offers_latest_and_custom() {
        let dir = project("2.1.0", "2.1.0", &[]);
        let npm = StubNpm {
            published: HashMap::from([("ui".to_string(), "2.1.0".to_string())]),
            ..Default::default()
        };
        // index 1 is "custom" when there is no next version
        let answers = Answers {
            selects: RefCell::new(VecDeque::from([1])),
            inputs: RefCell::new(VecDeque::from(["3.0.0".to_string()])),
            ..Default::default()
        };

        let version = pin_group(&npm, &answers, dir.path(), &group(), "next").unwrap();
        assert_eq!(version.as_deref(), Some("3.0.0"));
    }

    #[test]
    fn test_custom_version_defaults_to_latest() {
        let dir = project("2.1.0", "2.1.0", &[]);
        let npm = registry();
        let answers = Answers {
            selects: RefCell::new(VecDeque::from([2])),
            inputs: RefCell::new(VecDeque::from([String::new()])),
            ..Default::default()
        };

        let version = pin_group(&npm, &answers, dir.path(), &group(), "next").unwrap();
        assert_eq!(version.as_deref(), Some("2.1.0"));
        assert_eq!(npm.installs.borrow()[0].0, vec!["ui@2.1.0".to_string()]);
    }
}
