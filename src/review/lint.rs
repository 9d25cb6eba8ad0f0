//! Lint tool wrappers.
//!
//! Runs oxlint and biome through `bunx` and folds their output into a
//! uniform [`LintResult`]. Lint findings are data, not errors: a tool that
//! exits non-zero still produces a result, and only a failure to start the
//! tool at all propagates.

use crate::error::{DevToolError, Result};
use crate::project;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

// Both oxlint and biome end their report with a "Found X errors ... Y
// warnings" style summary line.
static ERROR_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Found (\d+) error").expect("Invalid error count regex"));
static WARNING_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+) warning").expect("Invalid warning count regex"));

/// Outcome of one lint tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintResult {
    /// True when the tool exited cleanly and reported zero errors.
    pub success: bool,
    /// Combined stdout and stderr of the tool.
    pub output: String,
    pub error_count: u64,
    pub warning_count: u64,
}

/// Run oxlint over the given files, or the whole tree with `all_files`.
///
/// oxlint discovers its own `.oxlintrc.json` from the project under review,
/// so no config path is forwarded.
pub fn run_oxlint(cwd: &Path, files: &[String], all_files: bool) -> Result<LintResult> {
    let mut args = vec!["oxlint".to_string()];
    push_file_args(&mut args, files, all_files);
    run_bunx(cwd, &args)
}

/// Run `biome lint` over the given files, or the whole tree with `all_files`.
pub fn run_biome_lint(cwd: &Path, files: &[String], all_files: bool) -> Result<LintResult> {
    let mut args = vec!["biome".to_string(), "lint".to_string()];
    if let Some(config) = biome_config_path(cwd) {
        args.push("--config-path".to_string());
        args.push(config.to_string_lossy().into_owned());
    }
    push_file_args(&mut args, files, all_files);
    run_bunx(cwd, &args)
}

/// Locate the biome config to forward.
///
/// The project under review can carry its own `config/review/biome.json`;
/// otherwise the tool's shipped copy is used. With neither present biome is
/// left to its own discovery.
fn biome_config_path(cwd: &Path) -> Option<PathBuf> {
    let project_config = cwd.join("config").join("review").join("biome.json");
    if project_config.is_file() {
        return Some(project_config);
    }

    let shipped = project::config_path("review/biome.json").ok()?;
    shipped.is_file().then_some(shipped)
}

fn push_file_args(args: &mut Vec<String>, files: &[String], all_files: bool) {
    if all_files {
        args.push(".".to_string());
    } else {
        args.extend(files.iter().cloned());
    }
}

fn run_bunx(cwd: &Path, args: &[String]) -> Result<LintResult> {
    let output = Command::new("bunx")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            DevToolError::UserError(format!(
                "failed to execute bunx {}: {} (is bun installed?)",
                args.first().map(String::as_str).unwrap_or(""),
                e
            ))
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(parse_lint_output(combined, output.status.success()))
}

/// Fold tool output and exit status into a [`LintResult`].
fn parse_lint_output(output: String, exit_ok: bool) -> LintResult {
    let error_count = capture_count(&ERROR_COUNT, &output);
    let warning_count = capture_count(&WARNING_COUNT, &output);

    LintResult {
        success: exit_ok && error_count == 0,
        output,
        error_count,
        warning_count,
    }
}

fn capture_count(pattern: &Regex, output: &str) -> u64 {
    pattern
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
