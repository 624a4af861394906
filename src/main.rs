//! multisecret CLI entry point
//!
//! Parses arguments, dispatches to the CLI commands, logs errors to
//! stderr and exits non-zero on failure. All logic lives in the library.

use multisecret::cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::report_failure(&e);
        std::process::exit(1);
    }
}
