//! CLI module for multisecret
//!
//! Provides the command-line interface:
//! - add: merge new keys into the logical document
//! - update: overwrite existing keys
//! - find: report which part holds a key path

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, MutationArgs};
pub use commands::{report_failure, run, run_command};
pub use errors::{CliError, CliResult};
