//! Package manager trait

use launchpad_core::error::Result;

use crate::versions::DependencyKind;

/// Registry queries and installs the version checker needs.
///
/// Implemented by [`crate::npm::NpmCli`]; tests substitute a stub.
pub trait PackageManager {
    /// Get the package manager name (e.g., "npm")
    fn name(&self) -> &'static str;

    /// Published version for a spec such as `pkg` or `pkg@next`.
    ///
    /// An empty string means the registry has no such version.
    fn view_version(&self, spec: &str) -> Result<String>;

    /// Install `pkg@version` specs, recording them under `kind`
    fn install(&self, specs: &[String], kind: DependencyKind) -> Result<()>;
}
