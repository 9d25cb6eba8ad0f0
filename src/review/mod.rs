//! Code review pipeline.
//!
//! Collects changed files from git, runs the lint wrappers over them, and
//! optionally hands the diff to an agent CLI for a prose review. Each stage
//! is independent so the CLI can compose or skip them per flags.

pub mod agent;
pub mod diff;
pub mod lint;

pub use agent::{AgentReviewOptions, build_review_prompt, command_exists, run_agent_review};
pub use diff::changed_files;
pub use lint::{LintResult, run_biome_lint, run_oxlint};

/// Which changes a review run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewScope {
    /// Working tree and index changes only.
    UncommittedOnly,
    /// Commits since the merge base with `base`, plus uncommitted changes.
    SinceBranch { base: String },
}

impl ReviewScope {
    /// Shell command line an agent should run to see the diff for this scope.
    pub fn git_diff_command(&self) -> String {
        match self {
            ReviewScope::UncommittedOnly => "git diff && git diff --cached".to_string(),
            ReviewScope::SinceBranch { base } => {
                format!("git diff {}...HEAD && git diff && git diff --cached", base)
            }
        }
    }
}
