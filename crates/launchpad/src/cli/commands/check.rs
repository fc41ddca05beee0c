//! Check command - compare managed npm packages with the registry

use std::path::Path;

use clap::Args;
use console::style;
use tracing::{debug, info};

use launchpad_adapters::versions::{
    choose_target, install_all, installed_packages, mark_updates, registry_versions,
};
use launchpad_adapters::{InstalledPackage, NpmCli, PackageManager};
use launchpad_core::config::PackageGroup;

use crate::cli::prompt::{DialoguerPrompter, Prompter};
use crate::cli::{load_project_config, output, require_tool, Cli};

/// Compare managed npm packages with the registry and offer updates
#[derive(Debug, Default, Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing check command");
        require_tool("npm")?;

        let cwd = std::env::current_dir()?;
        let config = load_project_config(&cwd, cli.quiet)?;
        let versions = &config.versions;

        if versions.group.is_none() && versions.standalone.is_empty() {
            output::warning("No managed packages configured under `versions`");
            return Ok(());
        }

        let npm = NpmCli::new(&cwd);
        let prompter = DialoguerPrompter;

        if let Some(group) = &versions.group {
            check_group(&npm, &prompter, &cwd, group, &versions.next_tag)?;
        }
        for name in &versions.standalone {
            check_standalone(&npm, &prompter, &cwd, name)?;
        }

        Ok(())
    }
}

/// Bring the package group in line with the primary package's registry version
fn check_group(
    manager: &dyn PackageManager,
    prompter: &dyn Prompter,
    project_dir: &Path,
    group: &PackageGroup,
    next_tag: &str,
) -> anyhow::Result<()> {
    let mut packages = installed_packages(project_dir, &group.members)?;
    if packages.is_empty() {
        debug!("no group member is declared in package.json");
        return Ok(());
    }

    let spinner = output::spinner(&format!("Looking up {} on the registry", group.primary));
    let registry = registry_versions(manager, &group.primary, next_tag);
    spinner.finish_and_clear();
    let registry = registry?;

    let target = choose_target(&packages, &registry.latest, &registry.next);
    info!(
        latest = %registry.latest,
        next = %registry.next,
        version = %target,
        "group target chosen"
    );
    mark_updates(&mut packages, &target);

    offer_updates(manager, prompter, &packages, &target)
}

/// A package outside the group, checked against its own latest release
fn check_standalone(
    manager: &dyn PackageManager,
    prompter: &dyn Prompter,
    project_dir: &Path,
    name: &str,
) -> anyhow::Result<()> {
    let mut packages = installed_packages(project_dir, &[name.to_string()])?;
    if packages.is_empty() {
        debug!(package = name, "standalone package not declared, skipping");
        return Ok(());
    }

    let spinner = output::spinner(&format!("Looking up {name} on the registry"));
    let latest = manager.view_version(name);
    spinner.finish_and_clear();
    let latest = latest?;

    mark_updates(&mut packages, &latest);
    offer_updates(manager, prompter, &packages, &latest)
}

fn offer_updates(
    manager: &dyn PackageManager,
    prompter: &dyn Prompter,
    packages: &[InstalledPackage],
    target: &str,
) -> anyhow::Result<()> {
    println!("{}", package_table(packages, target));

    let stale: Vec<InstalledPackage> = packages
        .iter()
        .filter(|p| p.needs_update)
        .cloned()
        .collect();
    if stale.is_empty() {
        output::success(&format!("Up to date with {}", style(target).green()));
        return Ok(());
    }

    let prompt = format!("Update {} package(s) to {}?", stale.len(), target);
    if prompter.confirm(&prompt, true)? {
        install_all(manager, &stale, target)?;
        output::success(&format!("Installed {target}"));
    }
    Ok(())
}

/// Table of managed packages against `target`, stale names in red
pub(super) fn package_table(packages: &[InstalledPackage], target: &str) -> String {
    let rows: Vec<Vec<String>> = packages
        .iter()
        .map(|p| {
            let name = if p.needs_update {
                style(&p.name).red().to_string()
            } else {
                style(&p.name).green().to_string()
            };
            vec![
                name,
                p.kind.to_string(),
                p.module_version.clone(),
                p.manifest_version.clone(),
                target.to_string(),
            ]
        })
        .collect();

    output::render_table(
        &["Package", "Kind", "Installed", "Declared", "Target"],
        &rows,
    )
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    use launchpad_adapters::DependencyKind;
    use tempfile::TempDir;

    /// Registry answers by spec; records installs
    #[derive(Default)]
    pub struct StubNpm {
        pub published: HashMap<String, String>,
        pub installs: RefCell<Vec<(Vec<String>, DependencyKind)>>,
    }

    impl PackageManager for StubNpm {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn view_version(&self, spec: &str) -> launchpad_core::Result<String> {
            Ok(self.published.get(spec).cloned().unwrap_or_default())
        }

        fn install(&self, specs: &[String], kind: DependencyKind) -> launchpad_core::Result<()> {
            self.installs.borrow_mut().push((specs.to_vec(), kind));
            Ok(())
        }
    }

    /// Answers confirmations, selects and inputs from queues
    #[derive(Default)]
    pub struct Answers {
        pub confirms: RefCell<VecDeque<bool>>,
        pub selects: RefCell<VecDeque<usize>>,
        pub inputs: RefCell<VecDeque<String>>,
    }

    impl Prompter for Answers {
        fn select(&self, prompt: &str, _: &[String], _: usize) -> anyhow::Result<usize> {
            self.selects
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("unexpected select: {prompt}"))
        }

        fn confirm(&self, prompt: &str, _: bool) -> anyhow::Result<bool> {
            self.confirms
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("unexpected confirm: {prompt}"))
        }

        fn input(
            &self,
            prompt: &str,
            default: &str,
            validate: &dyn Fn(&str) -> Result<(), String>,
        ) -> anyhow::Result<String> {
            let mut inputs = self.inputs.borrow_mut();
            while let Some(answer) = inputs.pop_front() {
                // an empty answer accepts the default, as on the terminal
                let answer = if answer.is_empty() {
                    default.to_string()
                } else {
                    answer
                };
                if validate(&answer).is_ok() {
                    return Ok(answer);
                }
            }
            Err(anyhow::anyhow!("no valid input for: {prompt}"))
        }
    }

    /// Project with `ui` (dependency) and `ui-cli` (devDependency) declared
    pub fn project(ui: &str, ui_cli: &str, installed: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            format!(
                r#"{{"name":"app","dependencies":{{"ui":"{ui}"}},"devDependencies":{{"ui-cli":"{ui_cli}"}}}}"#
            ),
        )
        .unwrap();
        for (name, version) in installed {
            let module = dir.path().join("node_modules").join(name);
            std::fs::create_dir_all(&module).unwrap();
            std::fs::write(
                module.join("package.json"),
                format!(r#"{{"name":"{name}","version":"{version}"}}"#),
            )
            .unwrap();
        }
        dir
    }

    pub fn group() -> PackageGroup {
        PackageGroup {
            primary: "ui".to_string(),
            members: vec!["ui".to_string(), "ui-cli".to_string(), "unused".to_string()],
        }
    }

    fn registry(latest: &str, next: &str) -> StubNpm {
        StubNpm {
            published: HashMap::from([
                ("ui".to_string(), latest.to_string()),
                ("ui@next".to_string(), next.to_string()),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_updates_only_stale_packages() {
        let dir = project("^2.1.0", "~2.0.0", &[("ui", "2.1.0"), ("ui-cli", "2.0.0")]);
        let npm = registry("2.1.0", "2.2.0-beta.1");
        let answers = Answers {
            confirms: RefCell::new(VecDeque::from([true])),
            ..Default::default()
        };

        check_group(&npm, &answers, dir.path(), &group(), "next").unwrap();

        assert_eq!(
            npm.installs.borrow().as_slice(),
            &[(vec!["ui-cli@2.1.0".to_string()], DependencyKind::DevDependencies)]
        );
    }

    #[test]
    fn test_prerelease_group_moves_to_next() {
        let dir = project("2.2.0-beta.0", "2.2.0-beta.0", &[]);
        let npm = registry("2.1.0", "2.2.0-beta.1");
        let answers = Answers {
            confirms: RefCell::new(VecDeque::from([true])),
            ..Default::default()
        };

        check_group(&npm, &answers, dir.path(), &group(), "next").unwrap();

        let installs = npm.installs.borrow();
        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0].0, vec!["ui@2.2.0-beta.1".to_string()]);
    }

    #[test]
    fn test_declined_update_installs_nothing() {
        let dir = project("2.0.0", "2.0.0", &[]);
        let npm = registry("2.1.0", "");
        let answers = Answers {
            confirms: RefCell::new(VecDeque::from([false])),
            ..Default::default()
        };

        check_group(&npm, &answers, dir.path(), &group(), "next").unwrap();
        assert!(npm.installs.borrow().is_empty());
    }

    #[test]
    fn test_up_to_date_group_does_not_ask() {
        let dir = project("2.1.0", "2.1.0", &[("ui", "2.1.0"), ("ui-cli", "2.1.0")]);
        let npm = registry("2.1.0", "2.0.0");

        check_group(&npm, &Answers::default(), dir.path(), &group(), "next").unwrap();
        assert!(npm.installs.borrow().is_empty());
    }

    #[test]
    fn test_undeclared_standalone_is_skipped() {
        let dir = project("2.1.0", "2.1.0", &[]);
        let npm = StubNpm::default();

        check_standalone(&npm, &Answers::default(), dir.path(), "lodash").unwrap();
        assert!(npm.installs.borrow().is_empty());
    }

    #[test]
    fn test_standalone_uses_its_own_latest() {
        let dir = project("2.1.0", "1.0.0", &[("ui-cli", "1.0.0")]);
        let npm = StubNpm {
            published: HashMap::from([("ui-cli".to_string(), "1.4.2".to_string())]),
            ..Default::default()
        };
        let answers = Answers {
            confirms: RefCell::new(VecDeque::from([true])),
            ..Default::default()
        };

        check_standalone(&npm, &answers, dir.path(), "ui-cli").unwrap();
        assert_eq!(
            npm.installs.borrow().as_slice(),
            &[(vec!["ui-cli@1.4.2".to_string()], DependencyKind::DevDependencies)]
        );
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        let npm = registry("2.1.0", "");
        assert!(check_group(&npm, &Answers::default(), dir.path(), &group(), "next").is_err());
    }

    #[test]
    fn test_package_table_lists_versions() {
        console::set_colors_enabled(false);
        let dir = project("^2.0.0", "2.1.0", &[("ui", "2.0.1")]);
        let mut packages = installed_packages(dir.path(), &group().members).unwrap();
        mark_updates(&mut packages, "2.1.0");

        let table = package_table(&packages, "2.1.0");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("ui "));
        assert!(lines[2].contains("2.0.1"));
        assert!(lines[3].starts_with("ui-cli"));
    }
}
