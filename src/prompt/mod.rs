//! Prompt generation, transformation, and installation.
//!
//! The pipeline runs in two stages. `generate` produces the canonical prompt
//! set in the project's intermediate `prompts/` directory (static templates
//! copied with placeholders rewritten, then dynamic generators overwriting
//! same-named files). `install` fans that set out into the assistant tool
//! directories, flat or as skill bundles.

pub mod generate;
pub mod generators;
pub mod install;
pub mod rewrite;
pub mod skills;
pub mod template;

pub use generate::{GenerateOptions, generate};
pub use install::{
    InstallMode, InstallOptions, InstallTarget, InstallationResult, builtin_targets, install_flat,
    install_skill_bundle, install_target,
};
pub use rewrite::replace_path_placeholders;

use crate::error::{DevToolError, Result};
use std::path::Path;

pub(crate) fn read_prompt(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| DevToolError::ReadFailure {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_prompt(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| {
        DevToolError::UserError(format!("failed to write '{}': {}", path.display(), e))
    })
}

pub(crate) fn create_dir_recursive(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        DevToolError::UserError(format!("failed to create directory '{}': {}", dir.display(), e))
    })
}
