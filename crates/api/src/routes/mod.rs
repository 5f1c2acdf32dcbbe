pub mod health;
pub mod jobs;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// ```text
/// POST /submit          submit a prompt
/// GET  /status          job status by id
/// GET  /list            paginated job listing
/// GET  /video           completed video URL
/// GET  /ws              live update WebSocket
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(jobs::router())
        .route("/ws", get(ws::ws_handler))
}
