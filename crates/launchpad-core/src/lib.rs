//! Launchpad Core - Core library for release automation
//!
//! This crate provides the foundational types, error handling, configuration,
//! and the pure release decision layer for the launchpad CLI.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{LaunchpadError, Result};
pub use types::{Environment, EnvironmentConfig, EnvironmentSettings, ReleaseState};
