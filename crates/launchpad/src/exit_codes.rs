//! Exit codes for the CLI
//!
//! Declined confirmations are a normal outcome and exit with `SUCCESS`.

/// Success
pub const SUCCESS: u8 = 0;

/// Rejected commit message or any runtime error
pub const ERROR: u8 = 1;
