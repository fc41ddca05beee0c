//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "launchpad.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "launchpad.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".launchpad.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".launchpad.toml",
        ALT_CONFIG_FILE,
    ]
}

/// Commented configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# launchpad configuration

git:
  remote: origin

environments:
  production_fallback: main
  development:
    branch: develop
    prefix: dev
  sit:
    branch: sit
    prefix: sit
  beta:
    branch: product
    prefix: release
  production:
    branch: master
    prefix: release

release:
  source_pattern: "^feature/+[0-9,vV.]+$"
  downstream: [beta, sit, development]
  default_ticket_id: "0000000"
  default_summary: "Feature improvements and code updates"
  policy:
    include_author: true
    sit_description_suffix: false
    confirm_sit_push: false

versions:
  next_tag: next
  standalone: []

hooks:
  commit_msg:
    stamp_version: true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate_config, Config};

    #[test]
    fn test_template_parses_and_validates() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.release.downstream.len(), 3);
    }
}
