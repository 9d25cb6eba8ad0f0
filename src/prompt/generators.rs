//! Dynamic prompt generators.
//!
//! Each generator renders one prompt from the tool's own template and doc
//! content. The registry below is the fixed table the generation pass walks;
//! the sdd renderer is served over MCP only and is deliberately not in it.

use crate::error::{DevToolError, Result};
use crate::project;
use crate::prompt::template::render_template_file;
use std::collections::BTreeMap;

/// A nullary generator producing rendered prompt text.
pub type PromptGenerator = fn() -> Result<String>;

/// Registry of generated prompt files, in write order.
///
/// Entries here overwrite same-named static templates during generation.
pub fn prompt_generators() -> Vec<(&'static str, PromptGenerator)> {
    vec![
        ("bug-check.md", bug_check_prompt),
        ("code-style-review.md", code_style_review_prompt),
    ]
}

/// Render the bug-check prompt.
pub fn bug_check_prompt() -> Result<String> {
    let template = project::template_dir()?.join("bug-check.md");
    render_template_file(template, &BTreeMap::new())
}

/// Render the code-style review prompt with the style guide embedded.
pub fn code_style_review_prompt() -> Result<String> {
    let code_style = read_doc("code-style.md")?;
    let template = project::template_dir()?.join("code-style-review.md");
    let data = BTreeMap::from([("code_style".to_string(), code_style)]);
    render_template_file(template, &data)
}

/// Render the spec-driven development prompt with the architecture doc embedded.
pub fn sdd_prompt() -> Result<String> {
    let architecture = read_doc("architecture.md")?;
    let template = project::template_dir()?.join("sdd.md");
    let data = BTreeMap::from([("architecture".to_string(), architecture)]);
    render_template_file(template, &data)
}

/// Read a documentation file under the project's `docs/` directory.
///
/// The content is opaque text to this crate; it is embedded into rendered
/// prompts or served over MCP as-is.
pub fn read_doc(name: &str) -> Result<String> {
    let path = project::doc_path(name)?;
    std::fs::read_to_string(&path).map_err(|e| DevToolError::ReadFailure { path, source: e })
}
