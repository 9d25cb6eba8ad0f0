//! Implementation of the `noaqh-dev review` command.
//!
//! Composes the review pipeline: collect changed files for the selected
//! scope, run the lint wrappers, then ask the agent CLI for a prose review.
//! Lint errors stop the pipeline before the agent runs and exit with the
//! lint failure code.

use crate::cli::ReviewArgs;
use crate::error::{DevToolError, Result};
use crate::review::{
    AgentReviewOptions, LintResult, ReviewScope, changed_files, run_agent_review, run_biome_lint,
    run_oxlint,
};
use std::path::Path;

/// Execute the `review` command.
pub fn cmd_review(args: ReviewArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        DevToolError::UserError(format!("failed to resolve current directory: {}", e))
    })?;
    let scope = review_scope(&args);

    let files = changed_files(&cwd, &scope)?;
    if files.is_empty() && !args.all_files {
        println!("No changes to review.");
        return Ok(());
    }

    if !args.no_lint {
        run_lint(&cwd, &files, args.all_files)?;
    }

    if !args.no_agent {
        let options = AgentReviewOptions {
            cwd: cwd.clone(),
            scope,
            command: args.agent.clone(),
        };
        match run_agent_review(&options)? {
            Some(review) => {
                println!();
                println!("{}", review);
            }
            None => println!("Agent review skipped."),
        }
    }

    Ok(())
}

/// Scope selected by the CLI flags.
fn review_scope(args: &ReviewArgs) -> ReviewScope {
    if args.uncommitted_only {
        ReviewScope::UncommittedOnly
    } else {
        ReviewScope::SinceBranch {
            base: args.base.clone(),
        }
    }
}

/// Run both lint wrappers and fail if either found errors.
fn run_lint(cwd: &Path, files: &[String], all_files: bool) -> Result<()> {
    let oxlint = run_oxlint(cwd, files, all_files)?;
    print_lint("oxlint", &oxlint);
    let biome = run_biome_lint(cwd, files, all_files)?;
    print_lint("biome", &biome);

    match lint_failures(&oxlint, &biome) {
        Some(summary) => Err(DevToolError::LintError(summary)),
        None => {
            let warnings = oxlint.warning_count + biome.warning_count;
            if warnings > 0 {
                println!("Lint passed with {} warning(s).", warnings);
            }
            Ok(())
        }
    }
}

fn print_lint(tool: &str, result: &LintResult) {
    println!("=== {} ===", tool);
    if result.output.trim().is_empty() {
        println!("(no output)");
    } else {
        println!("{}", result.output);
    }
}

/// Summary line of the failing tools, or `None` when both passed.
///
/// Warnings never fail a run; a tool that exited non-zero without an error
/// summary still counts as failed.
fn lint_failures(oxlint: &LintResult, biome: &LintResult) -> Option<String> {
    let mut failures = Vec::new();
    for (tool, result) in [("oxlint", oxlint), ("biome", biome)] {
        if result.success {
            continue;
        }
        if result.error_count > 0 {
            failures.push(format!("{} reported {} error(s)", tool, result.error_count));
        } else {
            failures.push(format!("{} failed", tool));
        }
    }

    if failures.is_empty() {
        None
    } else {
        Some(failures.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::test_support::{DirGuard, create_test_repo};
    use serial_test::serial;

    fn review_args() -> ReviewArgs {
        ReviewArgs {
            base: "main".to_string(),
            uncommitted_only: false,
            all_files: false,
            no_lint: false,
            no_agent: false,
            agent: "claude".to_string(),
        }
    }

    fn passing(warnings: u64) -> LintResult {
        LintResult {
            success: true,
            output: String::new(),
            error_count: 0,
            warning_count: warnings,
        }
    }

    fn failing(errors: u64) -> LintResult {
        LintResult {
            success: false,
            output: String::new(),
            error_count: errors,
            warning_count: 0,
        }
    }

    #[test]
    fn scope_defaults_to_branch_range() {
        let scope = review_scope(&review_args());
        assert_eq!(
            scope,
            ReviewScope::SinceBranch {
                base: "main".to_string()
            }
        );
    }

    #[test]
    fn scope_honors_uncommitted_only() {
        let mut args = review_args();
        args.uncommitted_only = true;
        assert_eq!(review_scope(&args), ReviewScope::UncommittedOnly);
    }

    #[test]
    fn lint_failures_none_when_both_pass() {
        assert_eq!(lint_failures(&passing(0), &passing(3)), None);
    }

    #[test]
    fn lint_failures_names_each_failing_tool() {
        let summary = lint_failures(&failing(2), &failing(1)).unwrap();
        assert_eq!(summary, "oxlint reported 2 error(s), biome reported 1 error(s)");
    }

    #[test]
    fn lint_failures_covers_crash_without_summary() {
        let summary = lint_failures(&passing(0), &failing(0)).unwrap();
        assert_eq!(summary, "biome failed");
    }

    #[test]
    fn lint_error_maps_to_lint_exit_code() {
        let err = DevToolError::LintError("oxlint reported 2 error(s)".to_string());
        assert_eq!(err.exit_code(), exit_codes::LINT_FAILURE);
    }

    #[test]
    #[serial]
    fn clean_repo_has_no_changes_to_review() {
        let repo = create_test_repo();
        let _guard = DirGuard::new(repo.path());

        let mut args = review_args();
        args.uncommitted_only = true;
        cmd_review(args).unwrap();
    }

    #[test]
    #[serial]
    fn changed_repo_runs_enabled_stages_only() {
        let repo = create_test_repo();
        // README.md is tracked by the fixture's initial commit.
        std::fs::write(repo.path().join("README.md"), "# Test\nchanged\n").unwrap();
        let _guard = DirGuard::new(repo.path());

        let mut args = review_args();
        args.uncommitted_only = true;
        args.no_lint = true;
        args.no_agent = true;
        cmd_review(args).unwrap();
    }
}
