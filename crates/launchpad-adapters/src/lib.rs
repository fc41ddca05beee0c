//! Launchpad Adapters - Package manager access for version checks
//!
//! Reads package.json and node_modules manifests, queries the npm registry
//! and installs managed packages at a chosen version.

pub mod npm;
mod traits;
pub mod versions;

pub use npm::{NpmCli, PackageJson};
pub use traits::PackageManager;
pub use versions::{DependencyKind, InstalledPackage, RegistryVersions};
