//! Implementation of the `noaqh-dev check-update` command.

use crate::cli::CheckUpdateArgs;
use crate::error::{DevToolError, Result};
use crate::git::{CheckUpdateOptions, check_for_remote_update};

/// Execute the `check-update` command.
///
/// Prints the ahead count with a `git pull` hint when the remote branch has
/// new commits, or an up-to-date message otherwise.
pub fn cmd_check_update(args: CheckUpdateArgs) -> Result<()> {
    let cwd = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| {
            DevToolError::UserError(format!("failed to resolve current directory: {}", e))
        })?,
    };

    let options = CheckUpdateOptions {
        cwd: Some(cwd.clone()),
        remote: Some(args.remote),
        branch: Some(args.branch),
    };
    let result = check_for_remote_update(&options)?;

    if result.is_up_to_date() {
        println!("No updates on {}.", result.remote_branch);
    } else {
        println!(
            "Remote {} is {} commit(s) ahead of local {}.",
            result.remote_branch, result.ahead_count, result.target_branch
        );
        println!("To update, run: cd {} && git pull", cwd.display());
    }

    Ok(())
}
