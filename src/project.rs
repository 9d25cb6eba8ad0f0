//! Project root resolution for noaqh-dev.
//!
//! Templates, docs, and the intermediate prompts directory all live under the
//! tool's own checkout. Every relative path is anchored at the resolved root
//! so commands behave the same regardless of the caller's working directory.

use crate::error::{DevToolError, Result};
use std::path::{Path, PathBuf};

/// Marker file that identifies the project root.
pub const PROJECT_MARKER: &str = "Cargo.toml";

/// Directory of static prompt templates, relative to the project root.
pub const TEMPLATE_DIR: &str = "template/prompts";

/// Intermediate directory generated prompts are written to, relative to the
/// project root.
pub const PROMPTS_DIR: &str = "prompts";

/// Resolve the absolute project root.
///
/// Strategy, in order:
/// 1. If the running executable sits in a directory literally named `bin`
///    (the installed layout), its parent is the candidate root.
/// 2. Otherwise the crate's own source checkout is the candidate.
///
/// A candidate only counts if it contains [`PROJECT_MARKER`] at top level.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path of the project root
/// * `Err(DevToolError::ProjectRootNotFound)` - No candidate had the marker
pub fn project_root() -> Result<PathBuf> {
    if let Some(candidate) = installed_root() {
        if has_marker(&candidate) {
            return Ok(candidate);
        }
    }

    let fallback = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if has_marker(&fallback) {
        return Ok(fallback);
    }

    Err(DevToolError::ProjectRootNotFound { path: fallback })
}

/// Root candidate for the installed `<root>/bin/noaqh-dev` layout.
fn installed_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let bin_dir = exe.parent()?;
    if bin_dir.file_name()? != "bin" {
        return None;
    }
    Some(bin_dir.parent()?.to_path_buf())
}

fn has_marker(dir: &Path) -> bool {
    dir.join(PROJECT_MARKER).is_file()
}

/// Path to the static prompt template directory.
pub fn template_dir() -> Result<PathBuf> {
    Ok(project_root()?.join(TEMPLATE_DIR))
}

/// Path to the intermediate generated prompts directory.
pub fn prompts_dir() -> Result<PathBuf> {
    Ok(project_root()?.join(PROMPTS_DIR))
}

/// Path to a documentation file under `docs/`.
pub fn doc_path(name: &str) -> Result<PathBuf> {
    Ok(project_root()?.join("docs").join(name))
}

/// Path to a file under the tool's own `config/` directory.
pub fn config_path(relative: &str) -> Result<PathBuf> {
    Ok(project_root()?.join("config").join(relative))
}
