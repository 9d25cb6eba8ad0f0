//! Changed-file discovery for review runs.
//!
//! Unions the `git diff --name-only` lists that make up the selected scope.
//! Ordering follows git's own output with first-occurrence dedupe, so the
//! review sees a stable file list across the working tree and the index.

use crate::error::Result;
use crate::git::run_git;
use crate::review::ReviewScope;
use std::path::Path;

/// List the files a review run should cover.
pub fn changed_files(cwd: &Path, scope: &ReviewScope) -> Result<Vec<String>> {
    let mut files = Vec::new();

    match scope {
        ReviewScope::UncommittedOnly => {
            collect_diff_files(cwd, &[], &mut files)?;
            collect_diff_files(cwd, &["--cached"], &mut files)?;
        }
        ReviewScope::SinceBranch { base } => {
            let range = format!("{}...HEAD", base);
            collect_diff_files(cwd, &[&range], &mut files)?;
            collect_diff_files(cwd, &[], &mut files)?;
            collect_diff_files(cwd, &["--cached"], &mut files)?;
        }
    }

    Ok(files)
}

fn collect_diff_files(cwd: &Path, extra_args: &[&str], files: &mut Vec<String>) -> Result<()> {
    let mut args = vec!["diff", "--name-only"];
    args.extend_from_slice(extra_args);

    let output = run_git(cwd, &args)?;
    if output.is_empty() {
        return Ok(());
    }
    for line in output.lines() {
        if !files.iter().any(|f| f == line) {
            files.push(line.to_string());
        }
    }

    Ok(())
}
