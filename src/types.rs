//! Typed tool arguments for the Prolific MCP tools

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default page size for paginated list endpoints
pub const DEFAULT_LIMIT: u64 = 200;

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// An explicit `null` counts as absent
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_limit<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(DEFAULT_LIMIT))
}

/// Pagination shared by the list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default = "default_limit", deserialize_with = "null_as_default_limit")]
    pub limit: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStudiesArgs {
    /// Status flag, e.g. active, unpublished, completed, all
    pub status: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStudyArgs {
    /// Path to a YAML or JSON study template
    pub template_path: Option<String>,
    /// Study definition passed through to the API as-is
    pub study_body: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publish: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub silent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSubmissionsArgs {
    pub study_id: String,
    #[serde(flatten)]
    pub page: Page,
    #[serde(default, deserialize_with = "null_as_default")]
    pub csv: bool,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStudyArgs {
    pub study_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub web: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateStudyArgs {
    pub study_id: String,
}

/// Study status transitions accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudyAction {
    Publish,
    Pause,
    Start,
    Stop,
}

impl StudyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyAction::Publish => "PUBLISH",
            StudyAction::Pause => "PAUSE",
            StudyAction::Start => "START",
            StudyAction::Stop => "STOP",
        }
    }
}

impl std::fmt::Display for StudyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStudyArgs {
    pub study_id: String,
    pub action: StudyAction,
    #[serde(default, deserialize_with = "null_as_default")]
    pub silent: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListWorkspacesArgs {
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParticipantGroupsArgs {
    pub project_id: String,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCampaignsArgs {
    pub workspace_id: String,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilterSetsArgs {
    pub workspace_id: String,
    #[serde(flatten)]
    pub page: Page,
}

/// Arguments for tools that take none; extra keys are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoArgs {}

/// A decoded tool invocation, one variant per registered tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments")]
pub enum ToolCall {
    #[serde(rename = "prolific_list_studies")]
    ListStudies(ListStudiesArgs),
    #[serde(rename = "prolific_create_study")]
    CreateStudy(CreateStudyArgs),
    #[serde(rename = "prolific_list_submissions")]
    ListSubmissions(ListSubmissionsArgs),
    #[serde(rename = "prolific_view_study")]
    ViewStudy(ViewStudyArgs),
    #[serde(rename = "prolific_duplicate_study")]
    DuplicateStudy(DuplicateStudyArgs),
    #[serde(rename = "prolific_transition_study")]
    TransitionStudy(TransitionStudyArgs),
    #[serde(rename = "prolific_list_workspaces")]
    ListWorkspaces(ListWorkspacesArgs),
    #[serde(rename = "prolific_list_participant_groups")]
    ListParticipantGroups(ListParticipantGroupsArgs),
    #[serde(rename = "prolific_list_campaigns")]
    ListCampaigns(ListCampaignsArgs),
    #[serde(rename = "prolific_list_filters")]
    ListFilters(NoArgs),
    #[serde(rename = "prolific_list_filter_sets")]
    ListFilterSets(ListFilterSetsArgs),
    #[serde(rename = "prolific_list_requirements")]
    ListRequirements(NoArgs),
    #[serde(rename = "prolific_who_am_i")]
    WhoAmI(NoArgs),
}

impl ToolCall {
    /// Decode a tool name and its argument bag into a typed call
    pub fn decode(name: &str, arguments: Value) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::json!({
            "tool": name,
            "arguments": arguments,
        }))
    }

    /// Registered tool name of this call
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ListStudies(_) => "prolific_list_studies",
            ToolCall::CreateStudy(_) => "prolific_create_study",
            ToolCall::ListSubmissions(_) => "prolific_list_submissions",
            ToolCall::ViewStudy(_) => "prolific_view_study",
            ToolCall::DuplicateStudy(_) => "prolific_duplicate_study",
            ToolCall::TransitionStudy(_) => "prolific_transition_study",
            ToolCall::ListWorkspaces(_) => "prolific_list_workspaces",
            ToolCall::ListParticipantGroups(_) => "prolific_list_participant_groups",
            ToolCall::ListCampaigns(_) => "prolific_list_campaigns",
            ToolCall::ListFilters(_) => "prolific_list_filters",
            ToolCall::ListFilterSets(_) => "prolific_list_filter_sets",
            ToolCall::ListRequirements(_) => "prolific_list_requirements",
            ToolCall::WhoAmI(_) => "prolific_who_am_i",
        }
    }
}
