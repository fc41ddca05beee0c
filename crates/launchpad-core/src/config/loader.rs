//! Locating and reading `launchpad` configuration files

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// On-disk syntax of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> Result<Config> {
        let config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        Ok(config)
    }
}

/// Read, parse and validate the configuration at `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(path = %path.display(), "config validated");
    Ok(config)
}

/// Paths tried inside one directory, in order of preference
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    config_file_names().into_iter().flat_map(move |name| {
        [dir.join(name), dir.join(".github").join(name)]
    })
}

/// Nearest configuration file at or above `start_dir`.
///
/// Each directory is searched for every known file name, directly and
/// under `.github/`, before moving to its parent.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");

    let found = start_dir
        .ancestors()
        .find_map(|dir| candidates(dir).find(|path| path.is_file()));

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!("no config file found"),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Environment;
    use tempfile::TempDir;

    const TOML_ORIGIN: &str = "[git]\nremote = \"origin\"\n";

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/launchpad.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("launchpad.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("launchpad.yml")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_toml_wins_over_yaml_in_same_dir() {
        let temp = TempDir::new().unwrap();
        let toml_path = write(temp.path(), "launchpad.toml", TOML_ORIGIN);
        write(temp.path(), "launchpad.yaml", "git:\n  remote: origin\n");

        assert_eq!(find_config(temp.path()), Some(toml_path));
    }

    #[test]
    fn test_github_dir_is_searched() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), ".github/launchpad.yaml", "{}\n");

        assert_eq!(find_config(temp.path()), Some(path));
    }

    #[test]
    fn test_root_file_shadows_github_dir() {
        let temp = TempDir::new().unwrap();
        let root = write(temp.path(), "launchpad.toml", TOML_ORIGIN);
        write(temp.path(), ".github/launchpad.toml", "[git]\nremote = \"upstream\"\n");

        assert_eq!(find_config(temp.path()), Some(root));
    }

    #[test]
    fn test_nested_dir_finds_nearest_ancestor() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "launchpad.yaml", "{}\n");
        let nearer = write(temp.path(), "app/.github/launchpad.yaml", "{}\n");
        let nested = temp.path().join("app/src/components");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(nearer));
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sub/launchpad.toml")).unwrap();
        let real = write(temp.path(), "launchpad.yaml", "{}\n");

        assert_eq!(find_config(&temp.path().join("sub")), Some(real));
    }

    #[test]
    fn test_load_toml() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "launchpad.toml",
            "[git]\nremote = \"upstream\"\n\n[release]\ndownstream = [\"sit\"]\n",
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.git.remote, "upstream");
        assert_eq!(config.release.downstream, vec![Environment::Sit]);
    }

    #[test]
    fn test_load_yaml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let yaml = [
            "environments:",
            "  production:",
            "    branch: trunk",
            "release:",
            "  policy:",
            "    include_author: false",
        ]
        .join("\n");
        let path = write(temp.path(), "launchpad.yaml", &yaml);

        let config = load_config(&path).unwrap();
        assert_eq!(config.environments.production.branch.as_deref(), Some("trunk"));
        assert!(!config.release.policy.include_author);
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "launchpad.toml", "[git]\nremote = \"\"\n");

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("launchpad.toml"));
        assert!(matches!(
            result,
            Err(crate::error::LaunchpadError::Config(ConfigError::Io(_)))
        ));
    }
}
