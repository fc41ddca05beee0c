//! Release tag naming and annotation

use crate::types::{Environment, EnvironmentConfig, ReleaseState};

/// Counter used when no earlier tag exists for the release line
pub const FIRST_COUNTER: &str = "01";

/// Counter following the latest matching tag.
///
/// The tag name is split on `-` and `_`; the segment after the one equal to
/// `tag_version` is read as the previous counter.
pub fn next_counter(latest_tag: Option<&str>, tag_version: &str) -> String {
    let Some(latest) = latest_tag else {
        return FIRST_COUNTER.to_string();
    };

    let segments: Vec<&str> = latest.split(['-', '_']).collect();
    segments
        .iter()
        .position(|s| *s == tag_version)
        .and_then(|i| segments.get(i + 1))
        .and_then(|s| s.parse::<u32>().ok())
        .and_then(|n| n.checked_add(1))
        .map(|n| format!("{n:02}"))
        .unwrap_or_else(|| FIRST_COUNTER.to_string())
}

/// Turn free text into something usable inside a tag name
pub fn sanitize_suffix(text: &str) -> Option<String> {
    let cleaned: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let collapsed = collapsed.trim_matches(['-', '.']).to_string();
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Name of the next release tag: `{prefix}-{version}-{counter}[_suffix]`
pub fn next_tag_name(
    envs: &EnvironmentConfig,
    state: &ReleaseState,
    latest_tag: Option<&str>,
    description: Option<&str>,
) -> String {
    let version = state.tag_version();
    let counter = next_counter(latest_tag, &version);
    let base = format!("{}-{}-{}", envs.prefix(state.target), version, counter);

    match state.target {
        Environment::Beta => format!("{base}_beta"),
        Environment::Sit => match description.and_then(sanitize_suffix) {
            Some(suffix) => format!("{base}_{suffix}"),
            None => base,
        },
        Environment::Development | Environment::Production => base,
    }
}

/// Merge commit message used when merging the source into the target
pub fn merge_message(tag: &str) -> String {
    format!("build:{tag}")
}

/// Content of the annotated release tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAnnotation {
    /// Release version
    pub version: String,
    /// Comma-separated feature ticket ids
    pub feature_ids: Option<String>,
    /// Comma-separated bug ticket ids
    pub bug_ids: Option<String>,
    /// Short description of the release
    pub summary: String,
}

impl TagAnnotation {
    /// Lines of the tag message
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Version:{}", self.version)];
        if let Some(ids) = self.feature_ids.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Feature IDs:{ids}"));
        }
        if let Some(ids) = self.bug_ids.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Bug IDs:{ids}"));
        }
        lines.push(format!("Summary:{}", self.summary));
        lines
    }

    /// Full tag message
    pub fn message(&self) -> String {
        self.lines().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_counter() {
        assert_eq!(next_counter(None, "v1.2.0"), "01");
    }

    #[test]
    fn test_counter_increments() {
        assert_eq!(next_counter(Some("release-v1.2.0-02"), "v1.2.0"), "03");
        assert_eq!(next_counter(Some("release-v1.2.0-09_beta"), "v1.2.0"), "10");
        assert_eq!(next_counter(Some("sit-v1.2.0-11_login-page"), "v1.2.0"), "12");
    }

    #[test]
    fn test_counter_resets_on_garbage() {
        assert_eq!(next_counter(Some("release-v1.2.0-final"), "v1.2.0"), "01");
        assert_eq!(next_counter(Some("release-1.2.0-04"), "v1.2.0"), "01");
        assert_eq!(next_counter(Some("release-v1.2.0"), "v1.2.0"), "01");
    }

    #[test]
    fn test_counter_at_integer_limit_restarts() {
        assert_eq!(next_counter(Some("release-v1.2.0-4294967295"), "v1.2.0"), "01");
        assert_eq!(next_counter(Some("release-v1.2.0-4294967294"), "v1.2.0"), "4294967295");
    }

    #[test]
    fn test_production_tag_scenario() {
        let envs = EnvironmentConfig::default();
        let state = ReleaseState::new("feature/v1.2.0", Environment::Production);
        let tag = next_tag_name(&envs, &state, Some("release-v1.2.0-02"), None);
        assert_eq!(tag, "release-v1.2.0-03");
    }

    #[test]
    fn test_beta_and_dev_tags() {
        let envs = EnvironmentConfig::default();
        let beta = ReleaseState::new("feature/1.2.0", Environment::Beta);
        assert_eq!(next_tag_name(&envs, &beta, None, None), "release-v1.2.0-01_beta");

        let dev = ReleaseState::new("feature/v1.2.0", Environment::Development);
        assert_eq!(next_tag_name(&envs, &dev, Some("dev-v1.2.0-05"), None), "dev-v1.2.0-06");
    }

    #[test]
    fn test_sit_description_suffix() {
        let envs = EnvironmentConfig::default();
        let sit = ReleaseState::new("feature/v1.2.0", Environment::Sit);
        assert_eq!(
            next_tag_name(&envs, &sit, None, Some("login page: fixes")),
            "sit-v1.2.0-01_login-page-fixes"
        );
        assert_eq!(next_tag_name(&envs, &sit, None, Some("  ")), "sit-v1.2.0-01");
    }

    #[test]
    fn test_annotation_message() {
        let annotation = TagAnnotation {
            version: "v1.2.0".to_string(),
            feature_ids: Some("1001,1002".to_string()),
            bug_ids: None,
            summary: "add login,fix header".to_string(),
        };
        assert_eq!(
            annotation.message(),
            "Version:v1.2.0\nFeature IDs:1001,1002\nSummary:add login,fix header"
        );
    }

    #[test]
    fn test_merge_message() {
        assert_eq!(merge_message("sit-v1.2.0-01"), "build:sit-v1.2.0-01");
    }
}
