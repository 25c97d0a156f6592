//! In-process stand-in for the HR backend used by the client tests.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{session::Session, transport::RestClient};

pub const TEST_TOKEN: &str = "test-token";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// `Value::Null` answers with an empty body.
    pub async fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        let raw = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.respond_raw(method, path, status, &raw).await;
    }

    /// `path` is matched against the still percent-encoded request path.
    pub async fn respond_raw(&self, method: &str, path: &str, status: u16, raw: &str) {
        self.routes
            .lock()
            .await
            .insert((method.to_string(), path.to_string()), (status, raw.to_string()));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn calls(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|request| (request.method.clone(), request.path.clone()))
            .collect()
    }

    pub async fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    backend.requests.lock().await.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let routes = backend.routes.lock().await;
    match routes.get(&(method.to_string(), path)) {
        Some((status, raw)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            raw.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"message":"route not mocked"}"#.to_string(),
        ),
    }
}

pub async fn spawn_backend() -> (String, MockBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let backend = MockBackend::default();
    let app = Router::new().fallback(handle).with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), backend)
}

pub async fn connected() -> (RestClient, Session, MockBackend) {
    let (server_url, backend) = spawn_backend().await;
    let client = RestClient::new(&server_url).expect("client");
    (client, Session::with_token(TEST_TOKEN), backend)
}
