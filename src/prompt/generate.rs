//! Prompt generation pass.
//!
//! Produces the canonical installable prompt set in the intermediate output
//! directory. Static templates are copied with their path placeholders
//! rewritten; the dynamic generator registry then writes its files on top.
//! A generated file always wins over a static template of the same name.

use crate::error::{DevToolError, Result};
use crate::project;
use crate::prompt::generators::prompt_generators;
use crate::prompt::rewrite::replace_path_placeholders;
use crate::prompt::{create_dir_recursive, read_prompt, write_prompt};
use std::path::PathBuf;

/// Options for one generation pass.
///
/// Unset fields fall back to the project's own `template/prompts/` and
/// `prompts/` directories.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub template_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Generate the installable prompt set.
///
/// A missing template directory only produces a warning; the dynamic
/// generators still run. A generator failure aborts the whole pass.
pub fn generate(options: &GenerateOptions) -> Result<()> {
    let project_root = project::project_root()?;
    let template_dir = match &options.template_dir {
        Some(dir) => dir.clone(),
        None => project::template_dir()?,
    };
    let output_dir = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => project::prompts_dir()?,
    };

    create_dir_recursive(&output_dir)?;

    if template_dir.is_dir() {
        for name in list_template_files(&template_dir)? {
            let content = read_prompt(&template_dir.join(&name))?;
            let rewritten = replace_path_placeholders(&content, &project_root);
            write_prompt(&output_dir.join(&name), &rewritten)?;
            println!("Copied from template: {}", name);
        }
    } else {
        eprintln!("Warning: template directory not found: {}", template_dir.display());
    }

    for (filename, generator) in prompt_generators() {
        let content = generator()?;
        write_prompt(&output_dir.join(filename), &content)?;
        println!("Generated: {}", filename);
    }

    Ok(())
}

fn list_template_files(template_dir: &std::path::Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(template_dir).map_err(|e| {
        DevToolError::UserError(format!("failed to list '{}': {}", template_dir.display(), e))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            DevToolError::UserError(format!("failed to list '{}': {}", template_dir.display(), e))
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(".md") {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
