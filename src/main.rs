//! noaqh-dev: Prompt distribution CLI and MCP companion for AI coding assistants.
//!
//! This is the main entry point for the `noaqh-dev` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod mcp;
pub mod project;
pub mod prompt;
pub mod review;
#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
