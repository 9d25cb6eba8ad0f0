//! Git command runner for noaqh-dev.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling, plus the remote staleness check behind
//! `check-update`. All git operations should go through this module.

use crate::error::{DevToolError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Default remote consulted by the staleness check.
pub const DEFAULT_REMOTE: &str = "origin";

/// Default branch compared against its remote-tracking counterpart.
pub const DEFAULT_BRANCH: &str = "main";

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(DevToolError::GitError)` - On non-zero exit code (mapped to exit code 3)
///
/// # Examples
///
/// ```no_run
/// use noaqh_dev::git::run_git;
/// use std::path::Path;
///
/// let output = run_git(Path::new("."), &["status", "--porcelain"])?;
/// println!("Changes: {}", output.stdout);
/// # Ok::<(), noaqh_dev::error::DevToolError>(())
/// ```
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            DevToolError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(DevToolError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Options for [`check_for_remote_update`].
///
/// Unset fields fall back to the current working directory, the `origin`
/// remote, and the `main` branch.
#[derive(Debug, Clone, Default)]
pub struct CheckUpdateOptions {
    pub cwd: Option<PathBuf>,
    pub remote: Option<String>,
    pub branch: Option<String>,
}

/// Outcome of a staleness check against the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckUpdateResult {
    /// Commits on the remote-tracking branch that the local branch lacks.
    pub ahead_count: u64,
    /// The local branch that was compared (e.g. `main`).
    pub target_branch: String,
    /// The remote-tracking branch it was compared against (e.g. `origin/main`).
    pub remote_branch: String,
}

impl CheckUpdateResult {
    /// Returns true if the local branch already has every remote commit.
    pub fn is_up_to_date(&self) -> bool {
        self.ahead_count == 0
    }
}

/// Check how far the remote branch is ahead of its local counterpart.
///
/// Fetches `<remote> <branch>` first so the comparison sees the remote's
/// current tip, then counts `<branch>..<remote>/<branch>`.
///
/// # Returns
///
/// * `Err(DevToolError::GitRepositoryNotFound)` - `cwd` is not inside a work tree
/// * `Err(DevToolError::GitFetch)` - the fetch itself failed
/// * `Err(DevToolError::GitReferenceNotFound)` - local or remote-tracking ref missing
pub fn check_for_remote_update(options: &CheckUpdateOptions) -> Result<CheckUpdateResult> {
    let cwd = match &options.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            DevToolError::UserError(format!("failed to resolve current directory: {}", e))
        })?,
    };
    let remote = options.remote.as_deref().unwrap_or(DEFAULT_REMOTE);
    let branch = options.branch.as_deref().unwrap_or(DEFAULT_BRANCH);

    ensure_inside_work_tree(&cwd)?;

    run_git(&cwd, &["fetch", remote, branch]).map_err(|e| DevToolError::GitFetch {
        remote: remote.to_string(),
        branch: branch.to_string(),
        source: Box::new(e),
    })?;

    let local_ref = format!("refs/heads/{}", branch);
    if run_git(&cwd, &["show-ref", "--verify", "--quiet", &local_ref]).is_err() {
        return Err(DevToolError::GitReferenceNotFound {
            reference: branch.to_string(),
        });
    }

    let remote_branch = format!("{}/{}", remote, branch);
    let remote_ref = format!("refs/remotes/{}", remote_branch);
    if run_git(&cwd, &["show-ref", "--verify", "--quiet", &remote_ref]).is_err() {
        return Err(DevToolError::GitReferenceNotFound {
            reference: remote_branch,
        });
    }

    let range = format!("{}..{}", branch, remote_branch);
    let output = run_git(&cwd, &["rev-list", "--count", &range])?;
    let ahead_count = output.stdout.parse::<u64>().map_err(|_| {
        DevToolError::GitError(format!(
            "unexpected rev-list output: '{}'",
            output.stdout
        ))
    })?;

    Ok(CheckUpdateResult {
        ahead_count,
        target_branch: branch.to_string(),
        remote_branch,
    })
}

/// Verify that `cwd` sits inside a git work tree.
///
/// The underlying git failure is kept as the error's source so the cause
/// stays inspectable.
fn ensure_inside_work_tree(cwd: &Path) -> Result<()> {
    match run_git(cwd, &["rev-parse", "--is-inside-work-tree"]) {
        Ok(output) if output.stdout == "true" => Ok(()),
        Ok(output) => Err(DevToolError::GitRepositoryNotFound {
            path: cwd.to_path_buf(),
            source: Box::new(DevToolError::GitError(format!(
                "rev-parse reported '{}'",
                output.stdout
            ))),
        }),
        Err(e) => Err(DevToolError::GitRepositoryNotFound {
            path: cwd.to_path_buf(),
            source: Box::new(e),
        }),
    }
}
