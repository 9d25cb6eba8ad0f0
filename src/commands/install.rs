//! Implementation of the `noaqh-dev install` command.
//!
//! Installs the generated prompt set into every built-in target, or into a
//! single named one. Targets run sequentially and independently: a failing
//! target is reported on stderr and the remaining targets still run, with
//! the whole command exiting non-zero if any target failed.

use crate::cli::InstallArgs;
use crate::error::{DevToolError, Result};
use crate::prompt::{InstallOptions, InstallTarget, InstallationResult, builtin_targets, install_target};

/// Execute the `install` command.
pub fn cmd_install(args: InstallArgs) -> Result<()> {
    let targets = select_targets(args.target.as_deref())?;
    let options = InstallOptions {
        source_dir: args.source_dir,
        destination_dir: args.dest_dir,
        file_prefix: args.prefix,
    };

    let total = targets.len();
    let mut failed = 0;
    for target in &targets {
        let destination = options
            .destination_dir
            .clone()
            .unwrap_or_else(|| target.destination.clone());
        println!("Installing {} -> {}", target.name, destination.display());

        match install_target(target, &options) {
            Ok(result) => print_result(&result),
            Err(err) => {
                eprintln!("Error: {}", err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(DevToolError::UserError(format!(
            "installation failed for {} of {} target(s)",
            failed, total
        )));
    }

    println!("Prompt installation complete.");
    Ok(())
}

/// All built-in targets, or just the named one.
fn select_targets(name: Option<&str>) -> Result<Vec<InstallTarget>> {
    let all = builtin_targets()?;
    let Some(name) = name else {
        return Ok(all);
    };

    match all.into_iter().find(|t| t.name == name) {
        Some(target) => Ok(vec![target]),
        None => Err(DevToolError::UserError(format!(
            "unknown install target '{}'. Valid targets: codex, claude, codex-skills, claude-skills",
            name
        ))),
    }
}

fn print_result(result: &InstallationResult) {
    for file in &result.overwritten {
        println!("Overwrote: {}", file);
    }
    for file in &result.copied {
        if !result.overwritten.contains(file) {
            println!("Copied: {}", file);
        }
    }
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }
}
