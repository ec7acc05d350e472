//! Remote client behavior against a mock Prolific API
//!
//! Run with: cargo test --test client_tests

mod common;

use axum::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{MockApi, TOKEN};
use prolific_mcp::client::USER_AGENT;
use prolific_mcp::error::ProlificError;
use prolific_mcp::types::*;

#[tokio::test]
async fn test_list_studies_url_and_headers() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/studies/", 200, r#"{"results": []}"#);

    let args = ListStudiesArgs {
        status: Some("active".to_string()),
        project_id: None,
    };
    let result = mock.client().list_studies(&args).await.unwrap();
    assert_eq!(result, json!({"results": []}));

    let request = mock.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/v1/studies/");
    assert_eq!(request.query.as_deref(), Some("active=1"));
    assert_eq!(request.header("authorization"), Some("Token test-token"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("user-agent"), Some(USER_AGENT));
}

#[tokio::test]
async fn test_list_studies_scoped_to_project() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/projects/p1/studies/", 200, r#"{"results": [{"id": "s1"}]}"#);

    let args = ListStudiesArgs {
        status: None,
        project_id: Some("p1".to_string()),
    };
    let result = mock.client().list_studies(&args).await.unwrap();
    assert_eq!(result["results"][0]["id"], "s1");
    assert_eq!(mock.last_request().query, None);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/studies/", 401, "Unauthorized");

    let err = mock
        .client()
        .list_studies(&ListStudiesArgs::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Failed to list studies: 401 Unauthorized");
}

#[tokio::test]
async fn test_list_submissions_pagination() {
    let mock = MockApi::start().await;
    let body = r#"{"results": [{"id": 1}], "meta": {"count": 1}}"#;
    mock.on(Method::GET, "/api/v1/studies/abc123/submissions/", 200, body);

    let args: ListSubmissionsArgs =
        serde_json::from_value(json!({"study_id": "abc123", "limit": 5})).unwrap();
    let result = mock.client().list_submissions(&args).await.unwrap();
    assert_eq!(result, json!({"results": [{"id": 1}], "meta": {"count": 1}}));

    let request = mock.last_request();
    assert!(request.path.contains("/studies/abc123/submissions/"));
    assert_eq!(request.query.as_deref(), Some("limit=5&offset=0"));
}

#[tokio::test]
async fn test_list_submissions_not_found() {
    let mock = MockApi::start().await;

    let args: ListSubmissionsArgs = serde_json::from_value(json!({"study_id": "badid"})).unwrap();
    let err = mock.client().list_submissions(&args).await.unwrap_err();
    assert!(err.to_string().contains("404"), "{err}");
    assert_eq!(mock.last_request().query.as_deref(), Some("limit=200&offset=0"));
}

#[tokio::test]
async fn test_create_study_publishes_after_creation() {
    let mock = MockApi::start().await;
    mock.on(Method::POST, "/api/v1/studies/", 201, r#"{"id": "s-1", "status": "UNPUBLISHED"}"#)
        .on(Method::POST, "/api/v1/studies/s-1/transition/", 200, r#"{"id": "s-1", "status": "ACTIVE"}"#);

    let args = CreateStudyArgs {
        study_body: Some(json!({"name": "Pilot", "reward": 100})),
        publish: true,
        ..Default::default()
    };
    let result = mock.client().create_study(&args).await.unwrap();
    // The created study is returned, not the transition response
    assert_eq!(result, json!({"id": "s-1", "status": "UNPUBLISHED"}));

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].json(), json!({"name": "Pilot", "reward": 100}));
    assert_eq!(requests[1].path, "/api/v1/studies/s-1/transition/");
    assert_eq!(requests[1].json(), json!({"action": "PUBLISH"}));
}

#[tokio::test]
async fn test_create_study_publish_failure_is_distinct() {
    let mock = MockApi::start().await;
    mock.on(Method::POST, "/api/v1/studies/", 201, r#"{"id": "s-2"}"#)
        .on(Method::POST, "/api/v1/studies/s-2/transition/", 400, r#"{"error": "not ready"}"#);

    let args = CreateStudyArgs {
        study_body: Some(json!({"name": "Pilot"})),
        publish: true,
        ..Default::default()
    };
    let err = mock.client().create_study(&args).await.unwrap_err();
    assert!(matches!(err, ProlificError::PublishFailed(_)));
    let message = err.to_string();
    assert!(message.starts_with("Study created but failed to publish"), "{message}");
    assert!(message.contains("400"), "{message}");
}

#[tokio::test]
async fn test_create_study_failure_skips_publish() {
    let mock = MockApi::start().await;
    mock.on(Method::POST, "/api/v1/studies/", 400, r#"{"name": ["required"]}"#);

    let args = CreateStudyArgs {
        study_body: Some(json!({})),
        publish: true,
        ..Default::default()
    };
    let err = mock.client().create_study(&args).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Failed to create study: 400 {"name": ["required"]}"#
    );
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_create_study_from_yaml_template() {
    let mock = MockApi::start().await;
    mock.on(Method::POST, "/api/v1/studies/", 201, r#"{"id": "s-3"}"#);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.yaml");
    std::fs::write(&path, "name: From template\nreward: 250\ndevice_compatibility:\n  - desktop\n")
        .unwrap();

    let args = CreateStudyArgs {
        template_path: Some(path.to_string_lossy().to_string()),
        ..Default::default()
    };
    let result = mock.client().create_study(&args).await.unwrap();
    assert_eq!(result, json!({"id": "s-3"}));
    assert_eq!(
        mock.last_request().json(),
        json!({"name": "From template", "reward": 250, "device_compatibility": ["desktop"]})
    );
}

#[tokio::test]
async fn test_create_study_rejects_two_sources() {
    let mock = MockApi::start().await;

    let args = CreateStudyArgs {
        template_path: Some("study.json".to_string()),
        study_body: Some(json!({"name": "x"})),
        ..Default::default()
    };
    let err = mock.client().create_study(&args).await.unwrap_err();
    assert!(matches!(err, ProlificError::InvalidInput(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_view_duplicate_and_transition_paths() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/studies/s-9", 200, r#"{"id": "s-9"}"#)
        .on(Method::POST, "/api/v1/studies/s-9/clone/", 201, r#"{"id": "s-10"}"#)
        .on(Method::POST, "/api/v1/studies/s-9/transition/", 200, r#"{"status": "PAUSED"}"#);
    let client = mock.client();

    let viewed = client
        .view_study(&ViewStudyArgs {
            study_id: "s-9".to_string(),
            web: false,
        })
        .await
        .unwrap();
    assert_eq!(viewed["id"], "s-9");

    let cloned = client
        .duplicate_study(&DuplicateStudyArgs {
            study_id: "s-9".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(cloned["id"], "s-10");
    assert_eq!(mock.last_request().body, "");

    let paused = client
        .transition_study(&TransitionStudyArgs {
            study_id: "s-9".to_string(),
            action: StudyAction::Pause,
            silent: true,
        })
        .await
        .unwrap();
    assert_eq!(paused["status"], "PAUSED");
    assert_eq!(mock.last_request().json(), json!({"action": "PAUSE"}));
}

#[tokio::test]
async fn test_workspace_scoped_lists_carry_query() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/workspaces/", 200, r#"{"results": []}"#)
        .on(Method::GET, "/api/v1/participant-groups/", 200, r#"{"results": []}"#)
        .on(Method::GET, "/api/v1/campaigns/", 200, r#"{"results": []}"#)
        .on(Method::GET, "/api/v1/filter-sets/", 200, r#"{"results": []}"#);
    let client = mock.client();

    client
        .list_workspaces(&ListWorkspacesArgs {
            page: Page { limit: 10, offset: 20 },
        })
        .await
        .unwrap();
    assert_eq!(mock.last_request().query.as_deref(), Some("limit=10&offset=20"));

    client
        .list_participant_groups(&ListParticipantGroupsArgs {
            project_id: "proj 1".to_string(),
            page: Page::default(),
        })
        .await
        .unwrap();
    assert_eq!(
        mock.last_request().query.as_deref(),
        Some("project_id=proj+1&limit=200&offset=0")
    );

    client
        .list_campaigns(&ListCampaignsArgs {
            workspace_id: "w&1".to_string(),
            page: Page::default(),
        })
        .await
        .unwrap();
    assert_eq!(
        mock.last_request().query.as_deref(),
        Some("workspace_id=w%261&limit=200&offset=0")
    );

    client
        .list_filter_sets(&ListFilterSetsArgs {
            workspace_id: "w1".to_string(),
            page: Page { limit: 1, offset: 0 },
        })
        .await
        .unwrap();
    let request = mock.last_request();
    assert_eq!(request.path, "/api/v1/filter-sets/");
    assert_eq!(request.query.as_deref(), Some("workspace_id=w1&limit=1&offset=0"));
}

#[tokio::test]
async fn test_parameterless_endpoints() {
    let mock = MockApi::start().await;
    mock.on(Method::GET, "/api/v1/filters/", 200, r#"{"results": [{"filter_id": "age"}]}"#)
        .on(Method::GET, "/api/v1/eligibility-requirements/", 200, r#"{"results": []}"#)
        .on(Method::GET, "/api/v1/users/me/", 200, r#"{"id": "u1", "email": "r@example.com"}"#);
    let client = mock.client();

    let filters = client.list_filters().await.unwrap();
    assert_eq!(filters["results"][0]["filter_id"], "age");
    assert_eq!(mock.last_request().query, None);

    client.list_requirements().await.unwrap();
    assert_eq!(mock.last_request().path, "/api/v1/eligibility-requirements/");

    let me = client.who_am_i().await.unwrap();
    assert_eq!(me["id"], "u1");
    assert_eq!(mock.last_request().header("authorization"), Some(format!("Token {}", TOKEN).as_str()));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mock = MockApi::start().await;
    mock.on(Method::POST, "/api/v1/studies/s-4/transition/", 204, "");

    let result = mock
        .client()
        .transition_study(&TransitionStudyArgs {
            study_id: "s-4".to_string(),
            action: StudyAction::Stop,
            silent: false,
        })
        .await
        .unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_connection_failure_names_operation() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config =
        prolific_mcp::ProlificConfig::new(TOKEN, Some(format!("http://{}", addr).as_str())).unwrap();
    let client = prolific_mcp::ProlificClient::new(&config).unwrap();
    let err = client.list_filters().await.unwrap_err();
    assert!(matches!(err, ProlificError::Request { .. }));
    assert!(err.to_string().starts_with("Failed to list filters:"), "{err}");
}
