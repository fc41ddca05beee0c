//! Installed package inspection and update planning

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use launchpad_core::error::Result;
use regex::Regex;
use semver::Version;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::npm::PackageJson;
use crate::traits::PackageManager;

static CUSTOM_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+").expect("Invalid regex"));

/// Section of package.json a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Dependencies,
    DevDependencies,
}

impl DependencyKind {
    /// npm install flag recording the dependency in this section
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Dependencies => "--save",
            Self::DevDependencies => "--save-dev",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed package declared by the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub kind: DependencyKind,
    /// Version found in node_modules, empty when not installed
    pub module_version: String,
    /// Declared version with range operators stripped
    pub manifest_version: String,
    /// Whether either version differs from the target
    pub needs_update: bool,
}

impl InstalledPackage {
    /// Whether the declared version is a prerelease
    pub fn is_prerelease(&self) -> bool {
        self.manifest_version.contains('-')
    }
}

/// Strip `^`/`~` and normalise like `semver.clean`.
///
/// Input that does not parse as a version is returned trimmed.
pub fn clean_version(range: &str) -> String {
    let stripped = range.trim().trim_start_matches(['^', '~']);
    let candidate = stripped.trim_start_matches('=').trim_start_matches(['v', 'V']);
    match Version::parse(candidate.trim()) {
        Ok(version) => version.to_string(),
        Err(_) => stripped.to_string(),
    }
}

#[derive(Deserialize)]
struct ModuleManifest {
    #[serde(default)]
    version: String,
}

/// Version of `name` under `node_modules`, empty when missing or unreadable
pub fn module_version(project_dir: &Path, name: &str) -> String {
    let path = project_dir
        .join("node_modules")
        .join(name)
        .join("package.json");
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str::<ModuleManifest>(&content).ok())
        .map(|m| m.version)
        .unwrap_or_default()
}

/// Managed packages the project declares, in `names` order.
///
/// A missing package.json is an error; a missing module is not.
#[instrument(skip(names), fields(project_dir = %project_dir.display()))]
pub fn installed_packages(project_dir: &Path, names: &[String]) -> Result<Vec<InstalledPackage>> {
    let manifest = PackageJson::load(&project_dir.join("package.json"))?;

    let packages: Vec<InstalledPackage> = names
        .iter()
        .filter_map(|name| {
            let (kind, range) = manifest.declared(name)?;
            Some(InstalledPackage {
                name: name.clone(),
                kind,
                module_version: module_version(project_dir, name),
                manifest_version: clean_version(range),
                needs_update: false,
            })
        })
        .collect();

    debug!(count = packages.len(), "found managed packages");
    Ok(packages)
}

fn core_version(version: &str) -> Option<(u64, u64, u64)> {
    Version::parse(&clean_version(version))
        .ok()
        .map(|v| (v.major, v.minor, v.patch))
}

/// Version the group should move to.
///
/// `next` wins only when a member is on a prerelease and `next` is ahead of
/// `latest` by core version.
pub fn choose_target(installed: &[InstalledPackage], latest: &str, next: &str) -> String {
    let on_prerelease = installed.iter().any(InstalledPackage::is_prerelease);
    let next_ahead = match (core_version(latest), core_version(next)) {
        (Some(latest), Some(next)) => latest < next,
        _ => false,
    };

    if on_prerelease && next_ahead {
        next.to_string()
    } else {
        latest.to_string()
    }
}

/// Flag every package whose module or manifest version differs from `target`
pub fn mark_updates(packages: &mut [InstalledPackage], target: &str) {
    for package in packages {
        package.needs_update =
            package.module_version != target || package.manifest_version != target;
    }
}

/// `pkg@version` specs grouped by section, runtime dependencies first
pub fn install_groups(
    packages: &[InstalledPackage],
    version: &str,
) -> Vec<(DependencyKind, Vec<String>)> {
    [DependencyKind::Dependencies, DependencyKind::DevDependencies]
        .into_iter()
        .filter_map(|kind| {
            let specs: Vec<String> = packages
                .iter()
                .filter(|p| p.kind == kind)
                .map(|p| format!("{}@{version}", p.name))
                .collect();
            (!specs.is_empty()).then_some((kind, specs))
        })
        .collect()
}

/// Whether user input is acceptable as a custom version
pub fn is_valid_custom_version(input: &str) -> bool {
    CUSTOM_VERSION_REGEX.is_match(input)
}

/// Registry versions of the primary package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryVersions {
    pub latest: String,
    pub next: String,
}

/// Look up `<primary>` and `<primary>@<next_tag>`
pub fn registry_versions(
    manager: &dyn PackageManager,
    primary: &str,
    next_tag: &str,
) -> Result<RegistryVersions> {
    Ok(RegistryVersions {
        latest: manager.view_version(primary)?,
        next: manager.view_version(&format!("{primary}@{next_tag}"))?,
    })
}

/// Install `packages` at `version`, one npm call per section
pub fn install_all(
    manager: &dyn PackageManager,
    packages: &[InstalledPackage],
    version: &str,
) -> Result<()> {
    for (kind, specs) in install_groups(packages, version) {
        manager.install(&specs, kind)?;
    }
    Ok(())
}
