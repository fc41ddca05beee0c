//! Merge and publish plan for a confirmed release

use crate::types::{Environment, EnvironmentConfig, ReleaseState};

use super::step::GitStep;
use super::tag::merge_message;

/// Git steps of the merge-and-publish phase, grouped so the caller can gate
/// the pushes behind a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Checkout and update the target, merge the source into it
    pub merge: Vec<GitStep>,
    /// Create the annotated release tag (empty for development)
    pub tag: Vec<GitStep>,
    /// Publish the target branch and the tag
    pub push: Vec<GitStep>,
    /// Switch back to the source branch
    pub finish: Vec<GitStep>,
    /// Forward-merge into downstream branches (production only)
    pub fan_out: Vec<GitStep>,
}

impl PublishPlan {
    /// Every step in execution order
    pub fn steps(&self) -> impl Iterator<Item = &GitStep> {
        self.merge
            .iter()
            .chain(&self.tag)
            .chain(&self.push)
            .chain(&self.finish)
            .chain(&self.fan_out)
    }
}

/// Build the publish plan for a release.
///
/// `tag_message` is ignored for development releases, which are never tagged.
pub fn publish_plan(
    state: &ReleaseState,
    envs: &EnvironmentConfig,
    remote: &str,
    tag: &str,
    tag_message: &str,
    downstream: &[Environment],
) -> PublishPlan {
    let target = envs.branch(state.target).to_string();
    let source = state.source.clone();

    let merge = vec![
        GitStep::Checkout(target.clone()),
        GitStep::PullFrom {
            remote: remote.to_string(),
            branch: target.clone(),
        },
        GitStep::Merge {
            source: source.clone(),
            message: Some(merge_message(tag)),
        },
        GitStep::Status,
    ];
    let finish = vec![GitStep::Checkout(source.clone())];

    if state.target == Environment::Development {
        return PublishPlan {
            merge,
            tag: Vec::new(),
            push: vec![GitStep::Push],
            finish,
            fan_out: Vec::new(),
        };
    }

    let tag_steps = vec![
        GitStep::Tag {
            name: tag.to_string(),
            message: tag_message.to_string(),
        },
        GitStep::Status,
    ];
    let push = vec![
        GitStep::Push,
        GitStep::PushTag {
            remote: remote.to_string(),
            tag: tag.to_string(),
        },
    ];

    let mut fan_out = Vec::new();
    if state.target == Environment::Production {
        for &env in downstream {
            fan_out.push(GitStep::Checkout(envs.branch(env).to_string()));
            fan_out.push(GitStep::Pull);
            fan_out.push(GitStep::Merge {
                source: source.clone(),
                message: None,
            });
            fan_out.push(GitStep::Push);
        }
        fan_out.push(GitStep::Checkout(source.clone()));
        fan_out.push(GitStep::Push);
    }

    PublishPlan {
        merge,
        tag: tag_steps,
        push,
        finish,
        fan_out,
    }
}
