use std::time::Duration;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;
use crate::ws::gateway::run_session;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is driven by [`run_session`] until
/// either side goes away.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let channel = state.config.channels.status.clone();
    let heartbeat = Duration::from_secs(state.config.ws_heartbeat_secs.max(1));

    ws.on_upgrade(move |socket| async move {
        run_session(socket, state.bus, channel, heartbeat).await;
    })
}
