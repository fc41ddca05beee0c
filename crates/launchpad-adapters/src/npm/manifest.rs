//! npm package.json handling

use std::collections::HashMap;
use std::path::Path;

use launchpad_core::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};

use crate::versions::DependencyKind;

/// package.json structure, reduced to the fields version checks read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    /// Package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Dependencies
    #[serde(default)]
    pub dependencies: HashMap<String, String>,

    /// Dev dependencies
    #[serde(default)]
    pub dev_dependencies: HashMap<String, String>,

    /// Preserve other fields
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

impl PackageJson {
    /// Load package.json from path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| AdapterError::ManifestNotFound(path.to_path_buf()))?;

        serde_json::from_str(&content).map_err(|e| {
            AdapterError::ManifestParseError(format!("{}: {e}", path.display())).into()
        })
    }

    /// Declared range for `name`, runtime dependencies taking precedence
    pub fn declared(&self, name: &str) -> Option<(DependencyKind, &str)> {
        self.dependencies
            .get(name)
            .map(|range| (DependencyKind::Dependencies, range.as_str()))
            .or_else(|| {
                self.dev_dependencies
                    .get(name)
                    .map(|range| (DependencyKind::DevDependencies, range.as_str()))
            })
    }
}
