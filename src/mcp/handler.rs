//! MCP method routing for the Prolific server

use serde_json::{json, Value};
use tokio::runtime::Runtime;

use super::dispatch::Dispatcher;
use super::protocol::{codes, methods, InitializeResult, McpHandler, McpRequest, McpResponse};
use super::tools::get_tool_definitions;
use crate::client::ProlificClient;
use crate::error::{ProlificError, Result};

/// MCP request handler
///
/// Owns the runtime that drives the async client; each `tools/call` blocks
/// until its single remote call completes.
pub struct ProlificHandler {
    dispatcher: Dispatcher,
    rt: Runtime,
}

impl ProlificHandler {
    pub fn new(client: ProlificClient) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProlificError::Config(format!("failed to start runtime: {}", e)))?;
        Ok(Self {
            dispatcher: Dispatcher::new(client),
            rt,
        })
    }

    fn handle_tool_call(&self, params: &Value) -> Result<Value> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProlificError::InvalidInput("tools/call requires a tool name".into()))?;
        let arguments = params.get("arguments").cloned();

        tracing::info!(tool = name, "Received tool call");
        let result = self
            .rt
            .block_on(self.dispatcher.call_tool(name, arguments));
        Ok(json!(result))
    }
}

impl McpHandler for ProlificHandler {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            if request.method != methods::INITIALIZED {
                tracing::debug!(method = %request.method, "Ignoring notification");
            }
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                tracing::debug!("Received tools/list");
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({ "tools": tools }))
            }
            methods::CALL_TOOL => match self.handle_tool_call(&request.params) {
                Ok(result) => McpResponse::success(request.id, result),
                Err(e) => McpResponse::from_error(request.id, e),
            },
            _ => McpResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }
}
