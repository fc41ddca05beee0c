//! Launchpad Git - Git adapter for release automation
//!
//! Reads (branches, tags, history) go through git2; mutations (checkout,
//! pull, merge, tag, push) shell out to the git CLI so that the user's
//! credentials and hooks apply.

mod branches;
mod command;
mod commits;
pub mod hooks;
mod repository;
mod tags;
pub mod types;
mod vcs;

pub use command::run_git;
pub use repository::{GitRepo, Result};
pub use tags::{latest_release_tag, TAG_SCAN_LIMIT};
pub use types::{CommitInfo, TagInfo};
pub use vcs::Vcs;
