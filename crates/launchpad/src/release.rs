//! Interactive release run
//!
//! Drives one release from branch selection to the pushed tag. Decisions come
//! from `launchpad_core::workflow`; this module only asks the user, runs the
//! resulting git steps and prints progress.

use chrono::Local;
use console::style;
use regex::Regex;
use tracing::{info, instrument};

use launchpad_changelog::{commits_after, ReleaseCommit, ReleaseNotes};
use launchpad_core::config::{Config, ReleaseConfig};
use launchpad_core::workflow::{
    next_tag_name, plan_source, plan_target, publish_plan, source_candidates, GitStep,
    SourcePlan, TagAnnotation, TargetPlan,
};
use launchpad_core::{Environment, EnvironmentConfig, ReleaseState};
use launchpad_git::{latest_release_tag, Vcs, TAG_SCAN_LIMIT};

use crate::cli::output;
use crate::cli::prompt::{any_input, Prompter};

/// Confirmation the user declined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Pushing a source branch the remote does not have
    PublishSource,
    /// Creating a target branch the remote does not have
    CreateTarget,
    /// Reviewing the commits about to be released
    ReviewCommits,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No local branch looks like a release branch
    NoCandidates,
    /// Stopped at a confirmation, nothing merged
    Declined(Gate),
    /// Source merged into the target
    Merged {
        target: Environment,
        tag: Option<String>,
        pushed: bool,
    },
}

/// One interactive release
pub struct ReleaseRun<'a> {
    vcs: &'a dyn Vcs,
    prompter: &'a dyn Prompter,
    release: &'a ReleaseConfig,
    envs: EnvironmentConfig,
    remote: &'a str,
    production_fallback: &'a str,
}

impl<'a> ReleaseRun<'a> {
    pub fn new(vcs: &'a dyn Vcs, prompter: &'a dyn Prompter, config: &'a Config) -> Self {
        Self {
            vcs,
            prompter,
            release: &config.release,
            envs: EnvironmentConfig::from_config(&config.environments),
            remote: &config.git.remote,
            production_fallback: &config.environments.production_fallback,
        }
    }

    /// Run the release from start to finish
    #[instrument(skip(self))]
    pub fn run(&self) -> anyhow::Result<Outcome> {
        print_banner();

        let remote_branches = self.vcs.remote_branches()?;
        let envs = self
            .envs
            .clone()
            .resolve_production(&remote_branches, self.production_fallback);
        let local_branches = self.vcs.local_branches()?;

        let Some(source) = self.select_source(&local_branches)? else {
            return Ok(Outcome::NoCandidates);
        };

        if let SourcePlan::Publish(steps) = plan_source(&source, self.remote, &remote_branches) {
            let prompt = format!("{source} is not on {}. Push it now?", self.remote);
            if !self.prompter.confirm(&prompt, true)? {
                return Ok(Outcome::Declined(Gate::PublishSource));
            }
            self.apply_all(&steps)?;
        }

        let target = self.select_target(&envs)?;
        let target_branch = envs.branch(target).to_string();
        match plan_target(
            &target_branch,
            self.remote,
            &local_branches,
            &remote_branches,
            envs.branch(Environment::Production),
        ) {
            TargetPlan::Ready => {}
            TargetPlan::Track(steps) => self.apply_all(&steps)?,
            TargetPlan::Create(steps) => {
                let prompt = format!(
                    "{target_branch} is not on {}. Create it from {}?",
                    self.remote,
                    envs.branch(Environment::Production)
                );
                if !self.prompter.confirm(&prompt, true)? {
                    return Ok(Outcome::Declined(Gate::CreateTarget));
                }
                self.apply_all(&steps)?;
            }
        }

        let state = ReleaseState::new(source, target);
        info!(
            source = %state.source,
            environment = %target,
            version = state.version(),
            "release selected"
        );

        let tags = self.vcs.recent_tags(TAG_SCAN_LIMIT)?;
        let tag_version = state.tag_version();
        let latest = latest_release_tag(&tags, envs.prefix(target), &tag_version);
        let latest_name = latest.map(|t| t.name.as_str());

        if target == Environment::Development {
            let tag = next_tag_name(&envs, &state, latest_name, None);
            return self.publish(&state, &envs, &tag, None);
        }

        let commits = self.collect_commits(&state, latest.map(|t| t.timestamp))?;
        self.render_commits(&commits);

        let prompt = format!(
            "Confirm release {} => {}",
            style(&state.source).yellow(),
            style(&target_branch).yellow()
        );
        if !self.prompter.confirm(&prompt, true)? {
            return Ok(Outcome::Declined(Gate::ReviewCommits));
        }

        let ask_description =
            target == Environment::Sit && self.release.policy.sit_description_suffix;
        let description = if ask_description {
            Some(self.prompter.input("Tag description (optional)", "", &any_input)?)
        } else {
            None
        };
        let tag = next_tag_name(&envs, &state, latest_name, description.as_deref());
        let annotation = self.annotation(&state, &commits)?;

        self.publish(&state, &envs, &tag, Some(&annotation))
    }

    fn select_source(&self, local_branches: &[String]) -> anyhow::Result<Option<String>> {
        let pattern = Regex::new(&self.release.source_pattern)?;
        let candidates = source_candidates(local_branches, &pattern);

        if candidates.is_empty() {
            output::warning(&format!(
                "No local branch matches {}. Name the release branch after its version, \
                 e.g. feature/v1.2.0.",
                style(&self.release.source_pattern).cyan()
            ));
            return Ok(None);
        }

        let index = self.prompter.select("Branch to release", &candidates, 0)?;
        Ok(candidates.into_iter().nth(index))
    }

    fn select_target(&self, envs: &EnvironmentConfig) -> anyhow::Result<Environment> {
        let items: Vec<String> = Environment::all()
            .iter()
            .map(|&env| format!("{} ({})", envs.label(env), envs.branch(env)))
            .collect();
        let index = self.prompter.select("Environment to release to", &items, 0)?;
        Environment::all()
            .get(index)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no environment at index {index}"))
    }

    /// Update the source branch and parse its version-stamped commits
    fn collect_commits(
        &self,
        state: &ReleaseState,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> anyhow::Result<Vec<ReleaseCommit>> {
        self.apply_all(&[
            GitStep::Checkout(state.source.clone()),
            GitStep::PullFrom {
                remote: self.remote.to_string(),
                branch: state.source.clone(),
            },
        ])?;

        let needle = format!("[{}]", state.version());
        let raw = self.vcs.commits_mentioning(&needle)?;
        Ok(commits_after(&raw, since))
    }

    fn render_commits(&self, commits: &[ReleaseCommit]) {
        if commits.is_empty() {
            output::warning("No new commits since the last release tag");
            return;
        }

        let mut headers = vec!["Type", "Date", "Ticket", "Description"];
        if self.release.policy.include_author {
            headers.push("Author");
        }

        let rows: Vec<Vec<String>> = commits
            .iter()
            .map(|c| {
                let mut row = vec![
                    output::badge(c.commit_type.as_str(), output::commit_type_style(c.commit_type)),
                    c.timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string(),
                    c.ticket
                        .as_deref()
                        .map(|t| style(t).magenta().to_string())
                        .unwrap_or_default(),
                    c.description.trim_end().to_string(),
                ];
                if self.release.policy.include_author {
                    row.push(c.author.clone());
                }
                row
            })
            .collect();

        println!("{}", output::render_table(&headers, &rows));
    }

    /// Tag message content, asking for ids and summary when commits carry none
    fn annotation(
        &self,
        state: &ReleaseState,
        commits: &[ReleaseCommit],
    ) -> anyhow::Result<TagAnnotation> {
        let notes = ReleaseNotes::from_commits(commits);
        let has_ids = notes.has_ids();
        let ReleaseNotes {
            feature_ids,
            bug_ids,
            summary,
        } = notes;

        let (feature_ids, bug_ids) = if has_ids {
            (feature_ids, bug_ids)
        } else {
            let kinds = vec!["Feature".to_string(), "Bug".to_string()];
            let kind = self.prompter.select(
                "No ticket ids found. What kind of ids does this release carry?",
                &kinds,
                0,
            )?;
            let ids = self.prompter.input(
                "Ticket ids (comma separated)",
                &self.release.default_ticket_id,
                &any_input,
            )?;
            let ids = if ids.is_empty() {
                self.release.default_ticket_id.clone()
            } else {
                ids
            };
            if kind == 0 {
                (Some(ids), None)
            } else {
                (None, Some(ids))
            }
        };

        let summary = match summary {
            Some(summary) => summary,
            None => {
                let text = self.prompter.input(
                    "Short description",
                    &self.release.default_summary,
                    &any_input,
                )?;
                if text.is_empty() {
                    self.release.default_summary.clone()
                } else {
                    text
                }
            }
        };

        Ok(TagAnnotation {
            version: state.version().to_string(),
            feature_ids,
            bug_ids,
            summary,
        })
    }

    fn publish(
        &self,
        state: &ReleaseState,
        envs: &EnvironmentConfig,
        tag: &str,
        annotation: Option<&TagAnnotation>,
    ) -> anyhow::Result<Outcome> {
        let message = annotation.map(TagAnnotation::message).unwrap_or_default();
        if let Some(annotation) = annotation {
            println!("\n{}", output::badge(tag, console::Style::new().on_green()));
            for line in annotation.lines() {
                println!("{line}");
            }
        }

        let plan = publish_plan(
            state,
            envs,
            self.remote,
            tag,
            &message,
            &self.release.downstream,
        );

        println!("\n{}", output::header("Merge"));
        self.apply_all(&plan.merge)?;

        if !plan.tag.is_empty() {
            println!("\n{}", output::header("Tag"));
            self.apply_all(&plan.tag)?;
        }

        let push_now = if state.target == Environment::Sit && self.release.policy.confirm_sit_push {
            let choices = vec!["Push now".to_string(), "Leave merged locally".to_string()];
            self.prompter.select("Publish the release?", &choices, 0)? == 0
        } else {
            true
        };

        if push_now {
            self.apply_all(&plan.push)?;
        } else {
            output::warning(&format!(
                "Left {} merged locally; push it when ready",
                envs.branch(state.target)
            ));
        }
        self.apply_all(&plan.finish)?;

        if push_now && !plan.fan_out.is_empty() {
            println!("\n{}", output::header("Forward merge"));
            self.apply_all(&plan.fan_out)?;
        }

        let tagged = (state.target != Environment::Development).then(|| tag.to_string());
        match &tagged {
            None => output::success("Development release complete"),
            Some(tag) => {
                output::success(&format!(
                    "{} release tag: {}",
                    envs.label(state.target),
                    output::tag_style().apply_to(tag)
                ));
                if let Some(hint) = &self.release.publish_hint {
                    output::info(hint);
                }
            }
        }

        info!(environment = %state.target, tag = ?tagged, pushed = push_now, "release finished");
        Ok(Outcome::Merged {
            target: state.target,
            tag: tagged,
            pushed: push_now,
        })
    }

    fn apply_all(&self, steps: &[GitStep]) -> anyhow::Result<()> {
        for step in steps {
            output::info(&step.to_string());
            let stdout = self.vcs.apply(step)?;
            let stdout = stdout.trim_end();
            if !stdout.is_empty() {
                println!("{stdout}");
            }
        }
        Ok(())
    }
}

fn print_banner() {
    println!("{}", output::header("launchpad release"));
    for rule in [
        "1. The release branch name must end with its version, e.g. feature/v1.2.0",
        "2. Everything to release must be committed and pushed",
        "3. On a merge conflict, resolve it by hand and run the release again",
    ] {
        println!("{}", style(rule).yellow());
    }
    println!();
}
