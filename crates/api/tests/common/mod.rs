#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use vidgen_api::config::{CorsOrigins, ServerConfig};
use vidgen_api::router::build_app_router;
use vidgen_api::state::AppState;
use vidgen_core::job::Job;
use vidgen_core::query::JobListQuery;
use vidgen_core::types::JobId;
use vidgen_db::{JobStore, MemoryJobStore, StoreError};
use vidgen_events::{Channels, EventBus, EventError, EventStream, MemoryEventBus};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        redis_url: "redis://unused".to_string(),
        channels: Channels::default(),
        ws_heartbeat_secs: 30,
    }
}

/// Handles to the in-memory collaborators behind a test app.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryJobStore>,
    pub bus: Arc<MemoryEventBus>,
}

/// Build the full application router over an in-memory store and bus.
///
/// Uses the same `build_app_router` as production, so the middleware stack
/// is exercised too.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryJobStore::new());
    let bus = Arc::new(MemoryEventBus::default());
    let state = AppState::new(store.clone(), bus.clone(), test_config());
    let router = build_app_router(state.clone(), &test_config());

    TestApp {
        router,
        state,
        store,
        bus,
    }
}

/// Build the router over arbitrary store and bus implementations.
pub fn build_app_with(store: Arc<dyn JobStore>, bus: Arc<dyn EventBus>) -> Router {
    let state = AppState::new(store, bus, test_config());
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Submit a prompt through the API and return the new job id.
pub async fn submit(app: &Router, prompt: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/submit",
        serde_json::json!({ "prompt": prompt }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["job_id"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Failing collaborators
// ---------------------------------------------------------------------------

fn offline() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// Store whose every operation fails, standing in for an unreachable database.
pub struct FailingStore;

#[async_trait]
impl JobStore for FailingStore {
    async fn create(&self, _: &Job) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn get_by_id(&self, _: JobId) -> Result<Job, StoreError> {
        Err(offline())
    }

    async fn list(&self, _: &JobListQuery) -> Result<Vec<Job>, StoreError> {
        Err(offline())
    }

    async fn get_video_url(&self, _: JobId) -> Result<String, StoreError> {
        Err(offline())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(offline())
    }
}

/// Bus whose every operation fails, standing in for an unreachable Redis.
pub struct FailingBus;

#[async_trait]
impl EventBus for FailingBus {
    async fn publish(&self, _: &str, _: String) -> Result<usize, EventError> {
        Err(EventError::Closed("bus offline".into()))
    }

    async fn subscribe(&self, _: &str) -> Result<EventStream, EventError> {
        Err(EventError::Closed("bus offline".into()))
    }

    async fn ping(&self) -> Result<(), EventError> {
        Err(EventError::Closed("bus offline".into()))
    }
}
