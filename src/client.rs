//! Prolific REST API client
//!
//! One async method per remote operation. Each method performs a single
//! authenticated request under `/api/v1/` and returns the response body as an
//! opaque JSON value. Non-success statuses become [`ProlificError::Api`].

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Url};
use serde_json::{json, Value};

use crate::config::ProlificConfig;
use crate::error::{ProlificError, Result};
use crate::template;
use crate::types::*;

/// User-Agent sent with every request
pub const USER_AGENT: &str = "prolific-mcp-server/1.0";

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Prolific API client
#[derive(Debug, Clone)]
pub struct ProlificClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ProlificClient {
    /// Create a new client with the fixed header set for `config`
    pub fn new(config: &ProlificConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Token {}", config.token()))
            .map_err(|_| ProlificError::Config("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProlificError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    /// Build `<base>/api/v1/<segments...>`; each segment is percent-encoded.
    /// A trailing `""` segment yields a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProlificError::Config(format!("base URL {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, operation: &'static str, url: Url) -> Result<Value> {
        tracing::debug!(operation, %url, "GET");
        self.send(operation, self.client.get(url)).await
    }

    async fn post(&self, operation: &'static str, url: Url, body: Option<&Value>) -> Result<Value> {
        tracing::debug!(operation, %url, "POST");
        let request = self.client.post(url);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        self.send(operation, request).await
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, "Request failed: {}", e);
            ProlificError::Request {
                operation,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ProlificError::Request {
            operation,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::error!("Failed to {}: {} {}", operation, status.as_u16(), body);
            return Err(ProlificError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ProlificError::Request {
            operation,
            message: format!("invalid JSON response: {}", e),
        })
    }

    /// List studies, optionally scoped to a project and filtered by status
    pub async fn list_studies(&self, args: &ListStudiesArgs) -> Result<Value> {
        tracing::info!(status = ?args.status, project_id = ?args.project_id, "Listing studies");
        let mut url = match args.project_id.as_deref() {
            Some(project_id) => {
                let project_id = require_id("project_id", project_id)?;
                self.endpoint(&["projects", project_id, "studies", ""])?
            }
            None => self.endpoint(&["studies", ""])?,
        };
        if let Some(status) = args.status.as_deref().filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair(status, "1");
        }
        self.get("list studies", url).await
    }

    /// Create a study from an inline body or a template file, optionally publishing it
    pub async fn create_study(&self, args: &CreateStudyArgs) -> Result<Value> {
        tracing::info!(publish = args.publish, silent = args.silent, "Creating study");

        let body = args.study_body.as_ref().filter(|b| !b.is_null());
        let template_path = args
            .template_path
            .as_deref()
            .filter(|p| !p.trim().is_empty());

        let study = match (body, template_path) {
            (Some(_), Some(_)) => {
                return Err(ProlificError::InvalidInput(
                    "Provide only one of study_body or template_path.".to_string(),
                ))
            }
            (Some(body), None) => body.clone(),
            (None, Some(path)) => template::load_template(path).map_err(|e| {
                tracing::error!("{}", e);
                e
            })?,
            (None, None) => {
                return Err(ProlificError::InvalidInput(
                    "Either study_body or template_path must be provided.".to_string(),
                ))
            }
        };

        let url = self.endpoint(&["studies", ""])?;
        let created = self.post("create study", url, Some(&study)).await?;

        if args.publish {
            let study_id = match created.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => {
                    return Err(ProlificError::PublishFailed(
                        "created study has no id".to_string(),
                    ))
                }
            };
            if let Err(e) = self.transition(&study_id, StudyAction::Publish).await {
                tracing::error!(study_id = %study_id, "Failed to publish study: {}", e);
                return Err(ProlificError::PublishFailed(e.to_string()));
            }
        }

        Ok(created)
    }

    /// List submissions for a study
    pub async fn list_submissions(&self, args: &ListSubmissionsArgs) -> Result<Value> {
        tracing::info!(
            study_id = %args.study_id,
            limit = args.page.limit,
            offset = args.page.offset,
            csv = args.csv,
            fields = ?args.fields,
            "Listing submissions"
        );
        let study_id = require_id("study_id", &args.study_id)?;
        let mut url = self.endpoint(&["studies", study_id, "submissions", ""])?;
        append_page(&mut url, args.page);
        self.get("list submissions", url).await
    }

    /// View a single study
    pub async fn view_study(&self, args: &ViewStudyArgs) -> Result<Value> {
        tracing::info!(study_id = %args.study_id, web = args.web, "Viewing study");
        let study_id = require_id("study_id", &args.study_id)?;
        let url = self.endpoint(&["studies", study_id])?;
        self.get("view study", url).await
    }

    /// Clone an existing study
    pub async fn duplicate_study(&self, args: &DuplicateStudyArgs) -> Result<Value> {
        tracing::info!(study_id = %args.study_id, "Duplicating study");
        let study_id = require_id("study_id", &args.study_id)?;
        let url = self.endpoint(&["studies", study_id, "clone", ""])?;
        self.post("duplicate study", url, None).await
    }

    /// Move a study to a new status
    pub async fn transition_study(&self, args: &TransitionStudyArgs) -> Result<Value> {
        tracing::info!(
            study_id = %args.study_id,
            action = %args.action,
            silent = args.silent,
            "Transitioning study"
        );
        self.transition(&args.study_id, args.action).await
    }

    async fn transition(&self, study_id: &str, action: StudyAction) -> Result<Value> {
        let study_id = require_id("study_id", study_id)?;
        let url = self.endpoint(&["studies", study_id, "transition", ""])?;
        let body = json!({ "action": action });
        self.post("transition study", url, Some(&body)).await
    }

    pub async fn list_workspaces(&self, args: &ListWorkspacesArgs) -> Result<Value> {
        tracing::info!(limit = args.page.limit, offset = args.page.offset, "Listing workspaces");
        let mut url = self.endpoint(&["workspaces", ""])?;
        append_page(&mut url, args.page);
        self.get("list workspaces", url).await
    }

    pub async fn list_participant_groups(&self, args: &ListParticipantGroupsArgs) -> Result<Value> {
        tracing::info!(project_id = %args.project_id, "Listing participant groups");
        let project_id = require_id("project_id", &args.project_id)?;
        let mut url = self.endpoint(&["participant-groups", ""])?;
        url.query_pairs_mut().append_pair("project_id", project_id);
        append_page(&mut url, args.page);
        self.get("list participant groups", url).await
    }

    pub async fn list_campaigns(&self, args: &ListCampaignsArgs) -> Result<Value> {
        tracing::info!(workspace_id = %args.workspace_id, "Listing campaigns");
        let workspace_id = require_id("workspace_id", &args.workspace_id)?;
        let mut url = self.endpoint(&["campaigns", ""])?;
        url.query_pairs_mut().append_pair("workspace_id", workspace_id);
        append_page(&mut url, args.page);
        self.get("list campaigns", url).await
    }

    pub async fn list_filters(&self) -> Result<Value> {
        tracing::info!("Listing filters");
        let url = self.endpoint(&["filters", ""])?;
        self.get("list filters", url).await
    }

    pub async fn list_filter_sets(&self, args: &ListFilterSetsArgs) -> Result<Value> {
        tracing::info!(workspace_id = %args.workspace_id, "Listing filter sets");
        let workspace_id = require_id("workspace_id", &args.workspace_id)?;
        let mut url = self.endpoint(&["filter-sets", ""])?;
        url.query_pairs_mut().append_pair("workspace_id", workspace_id);
        append_page(&mut url, args.page);
        self.get("list filter sets", url).await
    }

    pub async fn list_requirements(&self) -> Result<Value> {
        tracing::info!("Listing requirements");
        let url = self.endpoint(&["eligibility-requirements", ""])?;
        self.get("list requirements", url).await
    }

    /// Account details for the configured token
    pub async fn who_am_i(&self) -> Result<Value> {
        tracing::info!("Fetching current user");
        let url = self.endpoint(&["users", "me", ""])?;
        self.get("get current user", url).await
    }
}

fn append_page(url: &mut Url, page: Page) {
    url.query_pairs_mut()
        .append_pair("limit", &page.limit.to_string())
        .append_pair("offset", &page.offset.to_string());
}

fn require_id<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProlificError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}
