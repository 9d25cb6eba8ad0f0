//! MCP tool catalogue and dispatch.
//!
//! Every tool is a zero-argument getter: the prompt renderers from
//! `prompt::generators` plus the raw project docs. `tools/list` serves the
//! catalogue; `tools/call` routes through [`dispatch_tool`].

use crate::prompt::generators::{bug_check_prompt, code_style_review_prompt, read_doc, sdd_prompt};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Server name reported during the `initialize` handshake.
pub const SERVER_NAME: &str = "noaqh-tools";

/// A single MCP tool definition, as returned in `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl McpToolDef {
    /// Every tool here takes no arguments, so the schema is fixed.
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        }
    }
}

/// Returns all tools exposed over MCP.
///
/// Defined as a function (not a static) because `serde_json::json!` produces
/// a non-`const` `Value`. The list is small and cheap to allocate.
pub fn dev_tools() -> Vec<McpToolDef> {
    vec![
        McpToolDef::new(
            "get_bug_check_prompt",
            "Returns the bug check prompt.",
        ),
        McpToolDef::new(
            "get_code_style_review_prompt",
            "Returns the prompt for reviewing code style.",
        ),
        McpToolDef::new(
            "get_sdd_prompt",
            "Returns the prompt for SDD (Spec Driven Development).",
        ),
        McpToolDef::new(
            "get_app_doc",
            "Returns the application implementation guide.",
        ),
        McpToolDef::new(
            "get_architecture_doc",
            "Returns the architecture documentation.",
        ),
        McpToolDef::new(
            "get_code_style_doc",
            "Returns the code style documentation.",
        ),
    ]
}

/// Handle an MCP `tools/list` request.
///
/// Returns `{"tools": [...]}` ready to embed in a success response.
pub fn handle_tools_list() -> Value {
    json!({ "tools": dev_tools() })
}

/// Dispatch a `tools/call` invocation to the matching producer.
///
/// Returns the MCP result value: one text content block. Unknown names and
/// producer failures surface as errors for the server loop to map onto
/// JSON-RPC error responses.
pub fn dispatch_tool(name: &str) -> anyhow::Result<Value> {
    let text = match name {
        "get_bug_check_prompt" => bug_check_prompt()?,
        "get_code_style_review_prompt" => code_style_review_prompt()?,
        "get_sdd_prompt" => sdd_prompt()?,
        "get_app_doc" => read_doc("app.md")?,
        "get_architecture_doc" => read_doc("architecture.md")?,
        "get_code_style_doc" => read_doc("code-style.md")?,
        other => anyhow::bail!("unknown tool: {}", other),
    };

    Ok(json!({
        "content": [
            { "type": "text", "text": text }
        ]
    }))
}
