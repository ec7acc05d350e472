//! MCP tool definitions for the Prolific API

use once_cell::sync::Lazy;
use serde_json::json;

use super::protocol::{ToolAnnotations, ToolDefinition};

/// All tool definitions: (name, title, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str, &str)] = &[
    // Studies
    (
        "prolific_list_studies",
        "List Studies",
        "List all studies, optionally filtered by status or project.",
        r#"{
            "type": "object",
            "properties": {
                "status": {"type": "string", "description": "Filter studies by status (active, unpublished, completed, all)"},
                "project_id": {"type": "string", "description": "Filter studies by project ID"}
            }
        }"#,
    ),
    (
        "prolific_create_study",
        "Create new Study",
        "Create a new study from a YAML/JSON template file or a JSON object. Optionally publish and/or suppress output.",
        r#"{
            "type": "object",
            "properties": {
                "template_path": {"type": "string", "description": "Path to a YAML or JSON file describing the study (optional)"},
                "study_body": {"type": "object", "description": "JSON object describing the study (optional)"},
                "publish": {"type": "boolean", "default": false, "description": "Publish the study immediately after creation"},
                "silent": {"type": "boolean", "description": "Suppress output after creation"}
            },
            "oneOf": [
                {"required": ["template_path"]},
                {"required": ["study_body"]}
            ]
        }"#,
    ),
    (
        "prolific_list_submissions",
        "List Submissions for a Study",
        "List submissions for a given study, with optional pagination and field selection.",
        r#"{
            "type": "object",
            "properties": {
                "study_id": {"type": "string", "description": "The ID of the study to fetch submissions for"},
                "limit": {"type": "integer", "default": 200, "description": "Limit the number of submissions returned"},
                "offset": {"type": "integer", "default": 0, "description": "Offset for pagination"},
                "csv": {"type": "boolean", "description": "Return results in CSV format"},
                "fields": {"type": "string", "description": "Comma-separated list of fields to include"}
            },
            "required": ["study_id"]
        }"#,
    ),
    (
        "prolific_view_study",
        "View a Study",
        "View details for a specific study by ID.",
        r#"{
            "type": "object",
            "properties": {
                "study_id": {"type": "string", "description": "The ID of the study to view"},
                "web": {"type": "boolean", "description": "Open the study in the web application"}
            },
            "required": ["study_id"]
        }"#,
    ),
    (
        "prolific_duplicate_study",
        "Duplicate a Study",
        "Duplicate an existing study by ID.",
        r#"{
            "type": "object",
            "properties": {
                "study_id": {"type": "string", "description": "The ID of the study to duplicate"}
            },
            "required": ["study_id"]
        }"#,
    ),
    (
        "prolific_transition_study",
        "Transition a Study",
        "Transition a study to a new status (publish, pause, start, stop).",
        r#"{
            "type": "object",
            "properties": {
                "study_id": {"type": "string", "description": "The ID of the study to transition"},
                "action": {"type": "string", "enum": ["PUBLISH", "PAUSE", "START", "STOP"], "description": "The action to perform on the study"},
                "silent": {"type": "boolean", "description": "Suppress output after transition"}
            },
            "required": ["study_id", "action"]
        }"#,
    ),
    // Workspaces and projects
    (
        "prolific_list_workspaces",
        "List all Workspaces",
        "List all workspaces your token has access to, with optional pagination.",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "integer", "default": 200, "description": "Limit the number of workspaces returned (default 200)"},
                "offset": {"type": "integer", "default": 0, "description": "Offset for pagination (default 0)"}
            }
        }"#,
    ),
    (
        "prolific_list_participant_groups",
        "List all Participant Groups",
        "List all participant groups in a project, with optional pagination.",
        r#"{
            "type": "object",
            "properties": {
                "project_id": {"type": "string", "description": "The ID of the project to list participant groups for"},
                "limit": {"type": "integer", "default": 200, "description": "Limit the number of participant groups returned (default 200)"},
                "offset": {"type": "integer", "default": 0, "description": "Offset for pagination (default 0)"}
            },
            "required": ["project_id"]
        }"#,
    ),
    (
        "prolific_list_campaigns",
        "List all Campaigns",
        "List all campaigns in a workspace, with optional pagination.",
        r#"{
            "type": "object",
            "properties": {
                "workspace_id": {"type": "string", "description": "The ID of the workspace to list campaigns for"},
                "limit": {"type": "integer", "default": 200, "description": "Limit the number of campaigns returned (default 200)"},
                "offset": {"type": "integer", "default": 0, "description": "Offset for pagination (default 0)"}
            },
            "required": ["workspace_id"]
        }"#,
    ),
    // Screening
    (
        "prolific_list_filters",
        "List all Filters",
        "List all filters available for your study.",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    (
        "prolific_list_filter_sets",
        "List all Filter Sets",
        "List all filter sets in a workspace, with optional pagination.",
        r#"{
            "type": "object",
            "properties": {
                "workspace_id": {"type": "string", "description": "The ID of the workspace to list filter sets for"},
                "limit": {"type": "integer", "default": 200, "description": "Limit the number of filter sets returned (default 200)"},
                "offset": {"type": "integer", "default": 0, "description": "Offset for pagination (default 0)"}
            },
            "required": ["workspace_id"]
        }"#,
    ),
    (
        "prolific_list_requirements",
        "List all Requirements",
        "List all eligibility requirements available for your study.",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    // Account
    (
        "prolific_who_am_i",
        "Who am I?",
        "Get information about the current user.",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
];

static TOOLS: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, title, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
            annotations: Some(ToolAnnotations {
                title: title.to_string(),
            }),
        })
        .collect()
});

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> &'static [ToolDefinition] {
    &TOOLS
}

/// Look up a tool definition by name
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|t| t.name == name)
}
