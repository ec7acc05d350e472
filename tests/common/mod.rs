//! In-process mock of the Prolific API for integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use parking_lot::Mutex;
use serde_json::Value;

use prolific_mcp::{ProlificClient, ProlificConfig};

pub const TOKEN: &str = "test-token";

/// A canned response for one method + path
#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    status: u16,
    body: String,
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock Prolific API bound to a random local port
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    /// Bind and serve on the current Tokio runtime
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ProlificClient {
        let config = ProlificConfig::new(TOKEN, Some(self.base_url().as_str())).unwrap();
        ProlificClient::new(&config).unwrap()
    }

    /// Register a response for `method` on exactly `path`
    pub fn on(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.state.routes.lock().push(Route {
            method,
            path: path.to_string(),
            status,
            body: body.into(),
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let route = state
        .routes
        .lock()
        .iter()
        .find(|r| r.method == method && r.path == path)
        .cloned();

    match route {
        Some(route) => (
            StatusCode::from_u16(route.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            route.body,
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            format!(r#"{{"detail":"no mock for {} {}"}}"#, method, path),
        ),
    }
}
