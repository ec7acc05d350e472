//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio exposing the Prolific API as tools.

pub mod dispatch;
pub mod handler;
pub mod protocol;
pub mod tools;

pub use dispatch::Dispatcher;
pub use handler::ProlificHandler;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
    ToolDefinition,
};
pub use tools::{find_tool, get_tool_definitions, TOOL_DEFINITIONS};
