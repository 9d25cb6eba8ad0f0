//! Command implementations for noaqh-dev.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command handler owns its user-facing output;
//! errors propagate to `main` for the final stderr line and exit code.

mod check_update;
mod generate;
mod install;
mod review;

use crate::cli::Command;
use crate::error::Result;
use crate::mcp;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Install(args) => install::cmd_install(args),
        Command::Generate(args) => generate::cmd_generate(args),
        Command::CheckUpdate(args) => check_update::cmd_check_update(args),
        Command::Review(args) => review::cmd_review(args),
        Command::Serve => cmd_serve(),
    }
}

/// Execute the `serve` command.
///
/// Runs the MCP server loop on stdin/stdout until stdin closes.
fn cmd_serve() -> Result<()> {
    mcp::serve()
}
