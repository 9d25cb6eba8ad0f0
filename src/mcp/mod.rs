//! Model Context Protocol companion server.
//!
//! `noaqh-dev serve` exposes the prompt renderers and project docs to MCP
//! clients over stdio so assistants can pull them on demand instead of
//! relying on installed prompt files.
//!
//! | Module | Role |
//! |--------|------|
//! | `server` | JSON-RPC 2.0 wire types and the stdio message loop |
//! | `tools` | Tool catalogue, `tools/list` payload, `tools/call` dispatch |

pub mod server;
pub mod tools;

pub use server::{McpError, McpResponse, serve, serve_on};
pub use tools::{McpToolDef, SERVER_NAME, dev_tools, dispatch_tool, handle_tools_list};
