use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::engine::submission::PublishSnapshot;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the job store is reachable.
    pub db_healthy: bool,
    /// Whether the event bus is reachable.
    pub bus_healthy: bool,
    /// New-job notification outcomes since startup.
    pub notifications: PublishSnapshot,
}

/// GET /health -- returns service, store and event bus health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, bus) = tokio::join!(state.store.ping(), state.bus.ping());
    let db_healthy = db.is_ok();
    let bus_healthy = bus.is_ok();

    let status = if db_healthy && bus_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        bus_healthy,
        notifications: state.publish_stats.snapshot(),
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
