//! Line-delimited JSON-RPC 2.0 server over stdio.
//!
//! Implements the MCP lifecycle (`initialize`, `ping`) plus `tools/list` and
//! `tools/call`, one message per line. Notifications are consumed without a
//! response. The loop runs until the client closes stdin.
//!
//! Protocol version 2024-11-05.

use crate::error::{DevToolError, Result};
use crate::mcp::tools::{SERVER_NAME, dispatch_tool, handle_tools_list};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, Write};

/// MCP protocol revision this server implements.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Usage hint returned from `initialize` for the connected assistant.
const SERVER_INSTRUCTIONS: &str = "Provides development support tools. When a prompt starts \
     with 'n:', always use the tools registered with noaqh-tools.";

// Standard JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// An incoming JSON-RPC 2.0 request or notification.
///
/// Notifications carry no `id` and never get a response.
#[derive(Debug, Clone, Deserialize)]
struct McpRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// A JSON-RPC 2.0 response (success or error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    /// Construct a successful response.
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Construct an error response.
    pub fn error(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Serve MCP over stdio until the client closes the stream.
pub fn serve() -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve_on(stdin.lock(), stdout.lock())
}

/// Message loop over arbitrary reader/writer pairs.
///
/// Split out from [`serve`] so tests can drive a whole session through
/// in-memory buffers.
pub fn serve_on<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<()> {
    for line in reader.lines() {
        let line = line.map_err(|e| {
            DevToolError::UserError(format!("failed to read request: {}", e))
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = handle_line(line) {
            let serialized = serde_json::to_string(&response).map_err(|e| {
                DevToolError::UserError(format!("failed to serialize response: {}", e))
            })?;
            writeln!(writer, "{}", serialized).map_err(|e| {
                DevToolError::UserError(format!("failed to write response: {}", e))
            })?;
            writer.flush().map_err(|e| {
                DevToolError::UserError(format!("failed to flush response: {}", e))
            })?;
        }
    }

    Ok(())
}

fn handle_line(line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            // Unparseable input cannot carry an id, so the error echoes null.
            return Some(McpResponse::error(
                Value::Null,
                McpError::new(PARSE_ERROR, format!("parse error: {}", e)),
            ));
        }
    };

    handle_request(request)
}

fn handle_request(request: McpRequest) -> Option<McpResponse> {
    if request.jsonrpc != "2.0" {
        let id = request.id.unwrap_or(Value::Null);
        return Some(McpResponse::error(
            id,
            McpError::new(
                INVALID_REQUEST,
                format!("unsupported jsonrpc version: '{}'", request.jsonrpc),
            ),
        ));
    }

    // Notifications (no id) are consumed without a response.
    let id = request.id?;

    let response = match request.method.as_str() {
        "initialize" => McpResponse::ok(id, initialize_result()),
        "ping" => McpResponse::ok(id, json!({})),
        "tools/list" => McpResponse::ok(id, handle_tools_list()),
        "tools/call" => handle_tools_call(id, request.params),
        other => McpResponse::error(
            id,
            McpError::new(METHOD_NOT_FOUND, format!("method not found: {}", other)),
        ),
    };

    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "instructions": SERVER_INSTRUCTIONS,
    })
}

fn handle_tools_call(id: Value, params: Option<Value>) -> McpResponse {
    let name = params
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str);
    let Some(name) = name else {
        return McpResponse::error(
            id,
            McpError::new(INVALID_PARAMS, "missing required field 'name'"),
        );
    };

    match dispatch_tool(name) {
        Ok(result) => McpResponse::ok(id, result),
        Err(e) => {
            let message = e.to_string();
            let code = if message.starts_with("unknown tool") {
                INVALID_PARAMS
            } else {
                INTERNAL_ERROR
            };
            McpResponse::error(id, McpError::new(code, message))
        }
    }
}
