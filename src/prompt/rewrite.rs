//! Placeholder rewriting for prompt content.
//!
//! Prompt templates reference repository files three ways: an inline
//! `{{path("relative/file.md")}}` directive, a raw-content GitHub URL, and a
//! GitHub blob URL. All three are rewritten to absolute local paths anchored
//! at the project root, so installed prompts point at the reader's checkout
//! instead of the network.

use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// Inline directive form: `{{path("docs/x.md")}}`.
static PATH_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\{path\("([^"]+)"\)\}\}"#).expect("Invalid path directive regex"));

/// Raw content host form, pinned to the canonical repository and branch.
static RAW_CONTENT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://raw\.githubusercontent\.com/noaqh-corp/dev/refs/heads/main/([^\s)]+)")
        .expect("Invalid raw content URL regex")
});

/// Web blob form, pinned to the same repository and branch.
static BLOB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/noaqh-corp/dev/blob/main/([^\s)]+)")
        .expect("Invalid blob URL regex")
});

/// Rewrite every path placeholder in `content` to an absolute local path.
///
/// Replacement is global and purely textual: surrounding text, including
/// punctuation adjacent to a URL, is preserved verbatim. The captured
/// relative path stops at whitespace or a closing parenthesis, so Markdown
/// link syntax survives the rewrite. Content with no placeholders is
/// returned unchanged, and rewritten output contains no matchable pattern,
/// which makes the transform idempotent.
///
/// # Arguments
///
/// * `content` - The prompt text to rewrite
/// * `project_root` - Absolute directory all relative paths are joined to
pub fn replace_path_placeholders(content: &str, project_root: &Path) -> String {
    let pass = PATH_DIRECTIVE.replace_all(content, |caps: &Captures| {
        local_path(project_root, &caps[1])
    });
    let pass = RAW_CONTENT_URL.replace_all(&pass, |caps: &Captures| {
        local_path(project_root, &caps[1])
    });
    let pass = BLOB_URL.replace_all(&pass, |caps: &Captures| {
        local_path(project_root, &caps[1])
    });
    pass.into_owned()
}

fn local_path(root: &Path, relative: &str) -> String {
    root.join(relative).to_string_lossy().into_owned()
}
