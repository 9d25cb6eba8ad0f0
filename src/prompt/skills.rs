//! Skill metadata resolution for skill-bundle installation.
//!
//! A prompts source directory may carry a sidecar `skills-config.json`
//! mapping prompt filenames to curated display metadata. Files without an
//! entry (or without any sidecar at all) get their metadata derived from the
//! filename and the first lines of content. Metadata resolution never fails
//! an installation.

use crate::error::{DevToolError, Result};
use crate::project;
use crate::prompt::rewrite::replace_path_placeholders;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Reserved sidecar filename inside a prompts source directory.
pub const SKILLS_CONFIG_FILENAME: &str = "skills-config.json";

/// Maximum length of a synthesized skill description, in characters.
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Fallback when the prompt file cannot be read for description extraction.
const DESCRIPTION_UNAVAILABLE: &str = "description unavailable";

/// Curated metadata for one prompt file.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub description: String,
}

/// Sidecar mapping of prompt filename to curated metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SkillsConfig {
    entries: BTreeMap<String, SkillEntry>,
}

impl SkillsConfig {
    /// Load the sidecar config from a prompts source directory.
    ///
    /// Returns `Ok(None)` if the file does not exist, and also when it does
    /// not parse as the expected mapping shape: curated metadata is optional
    /// and bad data falls back to derived metadata. Read errors other than
    /// not-found propagate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DevToolError::ReadFailure {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        Ok(serde_json::from_str(&content).ok())
    }

    /// Look up the entry for an exact prompt filename.
    pub fn get(&self, filename: &str) -> Option<&SkillEntry> {
        self.entries.get(filename)
    }
}

/// Resolved display metadata for one skill bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
}

/// Resolve the display name and description for a prompt file.
///
/// A sidecar entry keyed by the exact filename wins verbatim. Otherwise the
/// name is the filename with its extension stripped and underscores replaced
/// by hyphens, and the description is derived from the file's first two
/// non-blank lines after placeholder rewriting, so a synthesized description
/// never leaks marker syntax into the front matter. An unreadable file
/// yields a fixed fallback description rather than an error.
pub fn resolve_skill_metadata(
    filename: &str,
    path: &Path,
    config: Option<&SkillsConfig>,
) -> SkillMetadata {
    if let Some(entry) = config.and_then(|c| c.get(filename)) {
        return SkillMetadata {
            name: entry.name.clone(),
            description: entry.description.clone(),
        };
    }

    let name = derive_skill_name(filename);
    let description = match std::fs::read_to_string(path) {
        Ok(content) => {
            let content = match project::project_root() {
                Ok(root) => replace_path_placeholders(&content, &root),
                Err(_) => content,
            };
            derive_description(&content)
        }
        Err(_) => DESCRIPTION_UNAVAILABLE.to_string(),
    };

    SkillMetadata { name, description }
}

fn derive_skill_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    stem.replace('_', "-")
}

/// First two non-blank lines joined with a space, capped at
/// [`MAX_DESCRIPTION_LENGTH`] characters.
fn derive_description(content: &str) -> String {
    let summary = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");

    if summary.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return summary;
    }

    let mut truncated: String = summary.chars().take(MAX_DESCRIPTION_LENGTH - 3).collect();
    truncated.push_str("...");
    truncated
}
