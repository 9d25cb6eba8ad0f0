//! Prompt installation into assistant tool directories.
//!
//! Two output shapes share one enumeration pass over the generated prompts:
//!
//! - **Flat**: each `x.md` lands as `<dest>/<prefix>x.md` (used by the
//!   command-style targets).
//! - **Skill bundle**: each `x.md` lands as `<dest>/<skill>/SKILL.md` with a
//!   synthesized two-field front-matter block (used by the skill targets).
//!
//! Existing destination files are deleted before the new copy is written and
//! reported as overwritten; every installed file is reported as copied, so
//! the overwritten list is always a subset of the copied list. Flat
//! installation copies content byte-for-byte; skill bundles pass the body
//! through the placeholder rewriter before composing `SKILL.md`, so a bundle
//! never ships marker syntax.

use crate::error::{DevToolError, Result};
use crate::project;
use crate::prompt::rewrite::replace_path_placeholders;
use crate::prompt::skills::{self, SKILLS_CONFIG_FILENAME, SkillMetadata, SkillsConfig};
use crate::prompt::{create_dir_recursive, read_prompt, write_prompt};
use std::path::{Path, PathBuf};

/// Default filename prefix for flat installation.
pub const DEFAULT_FILE_PREFIX: &str = "n-";

/// Filename written inside each skill bundle directory.
pub const SKILL_FILENAME: &str = "SKILL.md";

/// Options for one installation run.
///
/// Unset fields fall back to defaults computed at the call boundary: the
/// source defaults to the project's generated prompts directory, the
/// destination to the target being installed, and the prefix to
/// [`DEFAULT_FILE_PREFIX`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
}

/// Outcome of one installation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationResult {
    /// Destination names written this run (includes overwritten entries).
    pub copied: Vec<String>,
    /// Destination names that existed before this run and were replaced.
    pub overwritten: Vec<String>,
    /// Non-fatal conditions, e.g. an empty source directory.
    pub warnings: Vec<String>,
}

/// Output shape of an installation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Flat,
    SkillBundle,
}

/// One built-in installation destination.
#[derive(Debug, Clone)]
pub struct InstallTarget {
    pub name: &'static str,
    pub destination: PathBuf,
    pub mode: InstallMode,
}

/// The four built-in targets, resolved against the current home directory.
pub fn builtin_targets() -> Result<Vec<InstallTarget>> {
    Ok(vec![
        InstallTarget {
            name: "codex",
            destination: home_subdir(&[".codex", "prompts"])?,
            mode: InstallMode::Flat,
        },
        InstallTarget {
            name: "claude",
            destination: home_subdir(&[".claude", "commands"])?,
            mode: InstallMode::Flat,
        },
        InstallTarget {
            name: "codex-skills",
            destination: home_subdir(&[".codex", "skills"])?,
            mode: InstallMode::SkillBundle,
        },
        InstallTarget {
            name: "claude-skills",
            destination: home_subdir(&[".claude", "skills"])?,
            mode: InstallMode::SkillBundle,
        },
    ])
}

/// Install into one target, honoring caller overrides from `options`.
pub fn install_target(target: &InstallTarget, options: &InstallOptions) -> Result<InstallationResult> {
    let mut target_options = options.clone();
    if target_options.destination_dir.is_none() {
        target_options.destination_dir = Some(target.destination.clone());
    }
    match target.mode {
        InstallMode::Flat => install_flat(&target_options),
        InstallMode::SkillBundle => install_skill_bundle(&target_options),
    }
}

/// Install prompts as flat prefixed files.
///
/// # Returns
///
/// * `Ok(InstallationResult)` - Copied/overwritten names and any warnings
/// * `Err(DevToolError::PromptsSourceNotFound)` - Source missing or not a directory
pub fn install_flat(options: &InstallOptions) -> Result<InstallationResult> {
    let source_dir = resolve_source_dir(options)?;
    let destination_dir = match &options.destination_dir {
        Some(dir) => dir.clone(),
        None => home_subdir(&[".codex", "prompts"])?,
    };
    let prefix = options.file_prefix.as_deref().unwrap_or(DEFAULT_FILE_PREFIX);

    ensure_source_dir(&source_dir)?;
    create_dir_recursive(&destination_dir)?;
    let files = list_prompt_files(&source_dir)?;

    let mut result = InstallationResult::default();
    if files.is_empty() {
        result
            .warnings
            .push(format!("no prompt files found in '{}'", source_dir.display()));
        return Ok(result);
    }

    for filename in files {
        let source_path = source_dir.join(&filename);
        let destination_name = format!("{}{}", prefix, filename);
        let destination_path = destination_dir.join(&destination_name);

        if destination_path.exists() {
            remove_existing(&destination_path)?;
            result.overwritten.push(destination_name.clone());
        }

        copy_file(&source_path, &destination_path)?;
        result.copied.push(destination_name);
    }

    Ok(result)
}

/// Install prompts as one-directory-per-skill bundles.
///
/// Each prompt becomes `<dest>/<skill>/SKILL.md`, where the skill name and
/// the front-matter description come from the metadata resolver and the body
/// is the placeholder-rewritten prompt content. Rewriting is the identity
/// for content that already passed through generation. The reserved sidecar
/// config file is never installed as a skill.
pub fn install_skill_bundle(options: &InstallOptions) -> Result<InstallationResult> {
    let source_dir = resolve_source_dir(options)?;
    let destination_dir = match &options.destination_dir {
        Some(dir) => dir.clone(),
        None => home_subdir(&[".codex", "skills"])?,
    };
    let project_root = project::project_root()?;

    ensure_source_dir(&source_dir)?;
    create_dir_recursive(&destination_dir)?;
    let files: Vec<String> = list_prompt_files(&source_dir)?
        .into_iter()
        .filter(|name| name != SKILLS_CONFIG_FILENAME)
        .collect();

    let mut result = InstallationResult::default();
    if files.is_empty() {
        result
            .warnings
            .push(format!("no prompt files found in '{}'", source_dir.display()));
        return Ok(result);
    }

    let config = SkillsConfig::load(source_dir.join(SKILLS_CONFIG_FILENAME))?;

    for filename in files {
        let source_path = source_dir.join(&filename);
        let metadata = skills::resolve_skill_metadata(&filename, &source_path, config.as_ref());

        let skill_dir = destination_dir.join(&metadata.name);
        create_dir_recursive(&skill_dir)?;
        let destination_path = skill_dir.join(SKILL_FILENAME);
        let bundle_name = format!("{}/{}", metadata.name, SKILL_FILENAME);

        if destination_path.exists() {
            remove_existing(&destination_path)?;
            result.overwritten.push(bundle_name.clone());
        }

        let content = read_prompt(&source_path)?;
        let body = replace_path_placeholders(&content, &project_root);
        let document = compose_skill_document(&metadata, &body);
        write_prompt(&destination_path, &document)?;
        result.copied.push(bundle_name);
    }

    Ok(result)
}

/// Front matter followed by a blank line and the prompt body.
///
/// Quotes in both fields are escaped; newlines in the description are
/// collapsed to spaces so the block stays two lines.
fn compose_skill_document(metadata: &SkillMetadata, body: &str) -> String {
    let name = escape_front_matter_value(&metadata.name);
    let description = escape_front_matter_value(&metadata.description.replace('\n', " "));
    format!("---\nname: \"{}\"\ndescription: \"{}\"\n---\n\n{}", name, description, body)
}

fn escape_front_matter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn resolve_source_dir(options: &InstallOptions) -> Result<PathBuf> {
    match &options.source_dir {
        Some(dir) => Ok(dir.clone()),
        None => project::prompts_dir(),
    }
}

fn home_subdir(segments: &[&str]) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DevToolError::UserError("could not determine home directory".to_string()))?;
    Ok(segments.iter().fold(home, |path, segment| path.join(segment)))
}

fn ensure_source_dir(source_dir: &Path) -> Result<()> {
    match std::fs::metadata(source_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DevToolError::PromptsSourceNotFound {
            path: source_dir.to_path_buf(),
            source: None,
        }),
        Err(e) => Err(DevToolError::PromptsSourceNotFound {
            path: source_dir.to_path_buf(),
            source: Some(e),
        }),
    }
}

/// Immediate `.md` files in the source directory, sorted by name.
fn list_prompt_files(source_dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(source_dir).map_err(|e| DevToolError::PromptsSourceNotFound {
        path: source_dir.to_path_buf(),
        source: Some(e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            DevToolError::UserError(format!("failed to list '{}': {}", source_dir.display(), e))
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(".md") {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

fn remove_existing(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| {
        DevToolError::UserError(format!("failed to remove '{}': {}", path.display(), e))
    })
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    std::fs::copy(source, destination).map(|_| ()).map_err(|e| {
        DevToolError::UserError(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))
    })
}
