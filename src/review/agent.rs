//! Agent-backed review.
//!
//! Hands the review prompt to an agent CLI (claude by default) and captures
//! its verdict. The agent is optional: a missing binary or a failed run
//! skips the review instead of failing the whole pipeline.

use crate::error::{DevToolError, Result};
use crate::project;
use crate::review::ReviewScope;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Agent CLI invoked when the caller does not name one.
pub const DEFAULT_AGENT_COMMAND: &str = "claude";

/// How long the PATH probe may take before the agent counts as unavailable.
const PROBE_TIMEOUT: Duration = Duration::from_millis(300);

/// Options for one agent review run.
#[derive(Debug, Clone)]
pub struct AgentReviewOptions {
    pub cwd: PathBuf,
    pub scope: ReviewScope,
    /// Agent command line, parsed with shell quoting rules. The prompt and
    /// tool flags are appended to whatever is given here.
    pub command: String,
}

/// Run the agent review.
///
/// Returns `Ok(None)` when the agent binary is not installed or its run
/// fails; only a broken command line or an unreadable prompt is an error.
pub fn run_agent_review(options: &AgentReviewOptions) -> Result<Option<String>> {
    let argv = shell_words::split(&options.command).map_err(|e| {
        DevToolError::UserError(format!(
            "failed to parse agent command '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences.",
            options.command, e
        ))
    })?;

    let Some(program) = argv.first() else {
        return Err(DevToolError::UserError(format!(
            "agent command is empty after parsing: '{}'",
            options.command
        )));
    };

    if !command_exists(program) {
        return Ok(None);
    }

    let prompt = build_review_prompt(&options.cwd, &options.scope)?;

    let output = Command::new(program)
        .args(&argv[1..])
        .arg("-p")
        .arg(&prompt)
        .arg("--allowedTools")
        .arg("Read,Grep,Glob,Command")
        .current_dir(&options.cwd)
        .output()
        .map_err(|e| {
            DevToolError::UserError(format!(
                "failed to execute agent command '{}': {}",
                program, e
            ))
        })?;

    if output.status.success() {
        return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("E2BIG") || stderr.contains("argument list too long") {
        eprintln!("Warning: diff too large for agent review, skipping.");
        eprintln!("Error: {}", stderr.trim());
    }
    Ok(None)
}

/// Assemble the prompt handed to the agent.
///
/// The project under review can override the shipped review prompt with its
/// own `config/review/prompt.md`. The prompt tells the agent which git
/// command to run rather than inlining the diff, so large diffs never blow
/// the argument list.
pub fn build_review_prompt(cwd: &Path, scope: &ReviewScope) -> Result<String> {
    let preamble = read_prompt_preamble(cwd)?;

    Ok(format!(
        "{}\n\n\
         Run the following git command to collect the diff, then review the changed code:\n\n\
         ```bash\n{}\n```\n\n\
         Run the command and inspect the diff before writing your review.\n",
        preamble,
        scope.git_diff_command()
    ))
}

fn read_prompt_preamble(cwd: &Path) -> Result<String> {
    let project_prompt = cwd.join("config").join("review").join("prompt.md");
    if let Ok(content) = std::fs::read_to_string(&project_prompt) {
        return Ok(content);
    }

    let shipped = project::config_path("review/prompt.md")?;
    std::fs::read_to_string(&shipped).map_err(|e| DevToolError::ReadFailure {
        path: shipped,
        source: e,
    })
}

/// Check whether `command` resolves on PATH.
///
/// Probes with `which` under a short deadline so a wedged resolver never
/// stalls the review run.
pub fn command_exists(command: &str) -> bool {
    let child = Command::new("which")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let Ok(mut child) = child else {
        return false;
    };

    matches!(wait_with_timeout(&mut child, PROBE_TIMEOUT), Some(0))
}

/// Wait for a child process with timeout.
///
/// Returns the exit code, or None if the process was killed at the deadline
/// or never reported a code.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<i32> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(10);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.code(),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                std::thread::sleep(poll_interval);
            }
            Err(_) => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_prompt(dir: &TempDir, content: &str) {
        let config_dir = dir.path().join("config").join("review");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("prompt.md"), content).unwrap();
    }

    #[test]
    fn command_exists_finds_sh() {
        assert!(command_exists("sh"));
    }

    #[test]
    fn command_exists_rejects_unknown_binary() {
        assert!(!command_exists("definitely-not-a-real-command-qzx"));
    }

    #[test]
    fn prompt_uses_project_override() {
        let temp_dir = TempDir::new().unwrap();
        write_project_prompt(&temp_dir, "Custom review instructions.\n");

        let prompt = build_review_prompt(temp_dir.path(), &ReviewScope::UncommittedOnly).unwrap();
        assert!(prompt.starts_with("Custom review instructions."));
        assert!(prompt.contains("git diff && git diff --cached"));
    }

    #[test]
    fn prompt_includes_branch_range_for_branch_scope() {
        let temp_dir = TempDir::new().unwrap();
        write_project_prompt(&temp_dir, "Review this.\n");

        let scope = ReviewScope::SinceBranch {
            base: "develop".to_string(),
        };
        let prompt = build_review_prompt(temp_dir.path(), &scope).unwrap();
        assert!(prompt.contains("git diff develop...HEAD && git diff && git diff --cached"));
    }

    #[test]
    fn prompt_falls_back_to_shipped_copy() {
        let temp_dir = TempDir::new().unwrap();

        let prompt = build_review_prompt(temp_dir.path(), &ReviewScope::UncommittedOnly).unwrap();
        let shipped = project::config_path("review/prompt.md").unwrap();
        let shipped_content = std::fs::read_to_string(shipped).unwrap();
        assert!(prompt.starts_with(shipped_content.trim_end()));
    }

    #[test]
    fn missing_agent_skips_review() {
        let temp_dir = TempDir::new().unwrap();
        write_project_prompt(&temp_dir, "Review this.\n");

        let options = AgentReviewOptions {
            cwd: temp_dir.path().to_path_buf(),
            scope: ReviewScope::UncommittedOnly,
            command: "definitely-not-a-real-command-qzx".to_string(),
        };
        assert!(run_agent_review(&options).unwrap().is_none());
    }

    #[test]
    fn empty_agent_command_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let options = AgentReviewOptions {
            cwd: temp_dir.path().to_path_buf(),
            scope: ReviewScope::UncommittedOnly,
            command: "   ".to_string(),
        };
        let err = run_agent_review(&options).unwrap_err();
        assert!(matches!(err, DevToolError::UserError(_)));
    }

    #[test]
    fn successful_agent_run_returns_stdout() {
        let temp_dir = TempDir::new().unwrap();
        write_project_prompt(&temp_dir, "Review this.\n");

        // echo prints its arguments and exits 0, standing in for the agent.
        let options = AgentReviewOptions {
            cwd: temp_dir.path().to_path_buf(),
            scope: ReviewScope::UncommittedOnly,
            command: "echo".to_string(),
        };
        let review = run_agent_review(&options).unwrap().unwrap();
        assert!(review.contains("git diff && git diff --cached"));
        assert!(review.contains("--allowedTools"));
    }

    #[test]
    fn failed_agent_run_skips_review() {
        let temp_dir = TempDir::new().unwrap();
        write_project_prompt(&temp_dir, "Review this.\n");

        // `false` ignores its arguments and exits 1.
        let options = AgentReviewOptions {
            cwd: temp_dir.path().to_path_buf(),
            scope: ReviewScope::UncommittedOnly,
            command: "false".to_string(),
        };
        assert!(run_agent_review(&options).unwrap().is_none());
    }
}
