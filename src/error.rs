//! Error types for the noaqh-dev CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Callers pattern-match on variants, so failures keep their concrete kind as
//! they propagate instead of being re-wrapped into a generic error.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for noaqh-dev operations.
///
/// Each variant maps to a specific exit code. Git errors carry their
/// underlying failure as a `source` so the full chain stays inspectable.
#[derive(Error, Debug)]
pub enum DevToolError {
    /// No directory containing the project marker file could be resolved.
    #[error("project root not found (looked at '{}')", .path.display())]
    ProjectRootNotFound { path: PathBuf },

    /// The installation source directory is missing or not a directory.
    #[error("prompts directory not found: '{}'", .path.display())]
    PromptsSourceNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A template, doc, or prompt file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template engine rejected a template.
    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    /// The working directory is not inside a git work tree.
    #[error("not a git repository: '{}'", .path.display())]
    GitRepositoryNotFound {
        path: PathBuf,
        #[source]
        source: Box<DevToolError>,
    },

    /// `git fetch` against the configured remote failed.
    #[error("failed to fetch '{branch}' from '{remote}': {source}")]
    GitFetch {
        remote: String,
        branch: String,
        #[source]
        source: Box<DevToolError>,
    },

    /// A required local or remote-tracking ref does not exist.
    #[error("git reference not found: {reference}")]
    GitReferenceNotFound { reference: String },

    /// A git subprocess failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The review pipeline found lint errors.
    #[error("Lint check failed: {0}")]
    LintError(String),

    /// User provided invalid arguments or an operation hit an I/O problem.
    #[error("{0}")]
    UserError(String),
}

impl DevToolError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// "Not a git repository" is a clean user error (exit 1), not a git
    /// failure (exit 3): the user ran the command in the wrong place.
    pub fn exit_code(&self) -> i32 {
        match self {
            DevToolError::ProjectRootNotFound { .. } => exit_codes::USER_ERROR,
            DevToolError::PromptsSourceNotFound { .. } => exit_codes::USER_ERROR,
            DevToolError::ReadFailure { .. } => exit_codes::USER_ERROR,
            DevToolError::Template(_) => exit_codes::USER_ERROR,
            DevToolError::GitRepositoryNotFound { .. } => exit_codes::USER_ERROR,
            DevToolError::GitFetch { .. } => exit_codes::GIT_FAILURE,
            DevToolError::GitReferenceNotFound { .. } => exit_codes::GIT_FAILURE,
            DevToolError::GitError(_) => exit_codes::GIT_FAILURE,
            DevToolError::LintError(_) => exit_codes::LINT_FAILURE,
            DevToolError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for noaqh-dev operations.
pub type Result<T> = std::result::Result<T, DevToolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn project_root_not_found_has_correct_exit_code() {
        let err = DevToolError::ProjectRootNotFound {
            path: PathBuf::from("/tmp/nowhere"),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("/tmp/nowhere"));
    }

    #[test]
    fn prompts_source_not_found_has_correct_exit_code() {
        let err = DevToolError::PromptsSourceNotFound {
            path: PathBuf::from("/tmp/prompts"),
            source: None,
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("/tmp/prompts"));
    }

    #[test]
    fn prompts_source_not_found_chains_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "stat failed");
        let err = DevToolError::PromptsSourceNotFound {
            path: PathBuf::from("/tmp/prompts"),
            source: Some(io),
        };
        let cause = err.source().expect("cause should be chained");
        assert!(cause.to_string().contains("stat failed"));
    }

    #[test]
    fn read_failure_has_correct_exit_code() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DevToolError::ReadFailure {
            path: PathBuf::from("/tmp/x.md"),
            source: io,
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("/tmp/x.md"));
    }

    #[test]
    fn git_repository_not_found_is_user_error() {
        let err = DevToolError::GitRepositoryNotFound {
            path: PathBuf::from("/tmp/not-a-repo"),
            source: Box::new(DevToolError::GitError("rev-parse failed".to_string())),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn git_fetch_has_correct_exit_code_and_cause() {
        let err = DevToolError::GitFetch {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            source: Box::new(DevToolError::GitError("network down".to_string())),
        };
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
        assert!(err.to_string().contains("origin"));
        let cause = err.source().expect("cause should be chained");
        assert!(cause.to_string().contains("network down"));
    }

    #[test]
    fn git_reference_not_found_has_correct_exit_code() {
        let err = DevToolError::GitReferenceNotFound {
            reference: "origin/main".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
        assert_eq!(err.to_string(), "git reference not found: origin/main");
    }

    #[test]
    fn lint_error_has_correct_exit_code() {
        let err = DevToolError::LintError("3 error(s) found".to_string());
        assert_eq!(err.exit_code(), exit_codes::LINT_FAILURE);
        assert_eq!(err.to_string(), "Lint check failed: 3 error(s) found");
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = DevToolError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
}
