//! Tool dispatch
//!
//! Bridges `tools/call` invocations to [`ProlificClient`]. Every failure is
//! turned into an error payload; nothing here produces a JSON-RPC error.

use serde_json::Value;

use super::protocol::ToolCallResult;
use super::tools::find_tool;
use crate::client::ProlificClient;
use crate::error::{ProlificError, Result};
use crate::types::ToolCall;

/// Routes tool invocations to the remote client
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ProlificClient,
}

impl Dispatcher {
    pub fn new(client: ProlificClient) -> Self {
        Self { client }
    }

    /// Execute a tool invocation and wrap the outcome for the transport
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        match self.try_call(name, arguments).await {
            Ok(value) => ToolCallResult::json(&value),
            Err(e) => {
                tracing::warn!(tool = name, "Error executing tool: {}", e);
                ToolCallResult::error(e.to_string())
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: Option<Value>) -> Result<Value> {
        let arguments = match arguments {
            Some(Value::Null) | None => return Err(ProlificError::MissingArguments),
            Some(args) => args,
        };

        if find_tool(name).is_none() {
            return Err(ProlificError::UnknownTool(name.to_string()));
        }

        let call =
            ToolCall::decode(name, arguments).map_err(|e| ProlificError::InvalidArguments {
                tool: name.to_string(),
                message: e.to_string(),
            })?;

        self.execute(&call).await
    }

    /// Run a decoded call against the remote API
    pub async fn execute(&self, call: &ToolCall) -> Result<Value> {
        tracing::debug!(tool = call.name(), "Dispatching tool call");
        match call {
            ToolCall::ListStudies(args) => self.client.list_studies(args).await,
            ToolCall::CreateStudy(args) => self.client.create_study(args).await,
            ToolCall::ListSubmissions(args) => self.client.list_submissions(args).await,
            ToolCall::ViewStudy(args) => self.client.view_study(args).await,
            ToolCall::DuplicateStudy(args) => self.client.duplicate_study(args).await,
            ToolCall::TransitionStudy(args) => self.client.transition_study(args).await,
            ToolCall::ListWorkspaces(args) => self.client.list_workspaces(args).await,
            ToolCall::ListParticipantGroups(args) => {
                self.client.list_participant_groups(args).await
            }
            ToolCall::ListCampaigns(args) => self.client.list_campaigns(args).await,
            ToolCall::ListFilters(_) => self.client.list_filters().await,
            ToolCall::ListFilterSets(args) => self.client.list_filter_sets(args).await,
            ToolCall::ListRequirements(_) => self.client.list_requirements().await,
            ToolCall::WhoAmI(_) => self.client.who_am_i().await,
        }
    }
}
