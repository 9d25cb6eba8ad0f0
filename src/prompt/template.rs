//! Template rendering for prompt generation.
//!
//! Thin contract over the handlebars engine: template text in, a mapping of
//! variable name to string value in, rendered text out. Prompts are plain
//! Markdown, so HTML escaping is disabled. Substituted values are inserted
//! verbatim and never re-parsed as template syntax.

use crate::error::{DevToolError, Result};
use handlebars::{Handlebars, no_escape};
use std::collections::BTreeMap;
use std::path::Path;

/// Load a template file and render it with the given variable mapping.
///
/// # Arguments
///
/// * `path` - Template file location
/// * `data` - Variable name to value mapping
///
/// # Returns
///
/// * `Ok(String)` - The rendered text
/// * `Err(DevToolError::ReadFailure)` - The template file is missing or unreadable
/// * `Err(DevToolError::Template)` - The engine rejected the template
pub fn render_template_file<P: AsRef<Path>>(
    path: P,
    data: &BTreeMap<String, String>,
) -> Result<String> {
    let path = path.as_ref();
    let template = std::fs::read_to_string(path).map_err(|e| DevToolError::ReadFailure {
        path: path.to_path_buf(),
        source: e,
    })?;
    render_template_str(&template, data)
}

/// Render template text already held in memory.
pub fn render_template_str(template: &str, data: &BTreeMap<String, String>) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(no_escape);
    Ok(registry.render_template(template, data)?)
}
