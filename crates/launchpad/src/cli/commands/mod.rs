//! CLI commands

mod check;
mod completions;
mod hooks;
mod init;
mod release;
mod verify;
mod version;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use hooks::HooksCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use verify::{MessageRejected, VerifyCommand};
pub use version::VersionCommand;
