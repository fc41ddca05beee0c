//! Launchpad Changelog - Release commit parsing and message linting
//!
//! This crate turns version-stamped commits into release records, aggregates
//! their tickets for the tag annotation, and checks commit messages before
//! they are recorded.

pub mod lint;
pub mod parser;
pub mod release_notes;
pub mod types;

pub use parser::{parse_subject, CommitParser, ReleaseCommitParser};
pub use release_notes::{commits_after, ReleaseNotes};
pub use types::{CommitType, ReleaseCommit};
