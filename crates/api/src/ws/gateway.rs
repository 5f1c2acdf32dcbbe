use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use vidgen_core::job::Job;
use vidgen_events::EventBus;

/// Lifecycle of one client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    /// Upgraded, subscription not yet established.
    Connecting,
    /// Subscribed and forwarding events.
    Open,
    /// Subscription and socket released.
    Closed,
}

/// Why a session reached [`GatewayState::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    SubscribeFailed,
    /// Close frame, end of stream or receive error from the client.
    ClientClosed,
    /// Writing to the client failed; assume it disconnected.
    SendFailed,
    /// The event bus subscription ended.
    BusClosed,
}

struct Session {
    conn_id: uuid::Uuid,
    state: GatewayState,
}

impl Session {
    fn transition(&mut self, next: GatewayState) {
        tracing::debug!(conn_id = %self.conn_id, from = ?self.state, to = ?next, "Gateway state change");
        self.state = next;
    }
}

/// Drive one WebSocket connection.
///
/// Subscribes to `channel`, then forwards every event that parses as a
/// [`Job`] to the client as a JSON text frame. Malformed events are
/// logged and skipped. A Ping is sent every `heartbeat`.
///
/// The subscription and both socket halves are owned by this function, so
/// they are released on every return path.
pub async fn run_session(
    socket: WebSocket,
    bus: Arc<dyn EventBus>,
    channel: String,
    heartbeat: Duration,
) -> CloseReason {
    let mut session = Session {
        conn_id: uuid::Uuid::new_v4(),
        state: GatewayState::Connecting,
    };
    let conn_id = session.conn_id;
    tracing::info!(%conn_id, "WebSocket connected");

    let (mut sink, mut stream) = socket.split();

    let mut events = match bus.subscribe(&channel).await {
        Ok(events) => events,
        Err(e) => {
            tracing::error!(%conn_id, %channel, error = %e, "Failed to subscribe to status updates");
            let _ = sink.send(Message::Close(None)).await;
            session.transition(GatewayState::Closed);
            return CloseReason::SubscribeFailed;
        }
    };
    session.transition(GatewayState::Open);

    let mut ticker = tokio::time::interval(heartbeat);
    // The first tick completes immediately.
    ticker.tick().await;

    let reason = loop {
        tokio::select! {
            event = events.next() => {
                let Some(payload) = event else {
                    tracing::warn!(%conn_id, "Status update subscription ended");
                    break CloseReason::BusClosed;
                };

                let job: Job = match serde_json::from_str(&payload) {
                    Ok(job) => job,
                    Err(e) => {
                        tracing::warn!(%conn_id, error = %e, "Skipping malformed job update");
                        continue;
                    }
                };

                let text = match serde_json::to_string(&job) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(%conn_id, error = %e, "Failed to encode job update");
                        continue;
                    }
                };

                if sink.send(Message::Text(text.into())).await.is_err() {
                    tracing::debug!(%conn_id, job_id = %job.id, "Failed to send job update");
                    break CloseReason::SendFailed;
                }
            }

            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break CloseReason::ClientClosed,
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(%conn_id, "Pong received");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(%conn_id, error = %e, "WebSocket receive error");
                    break CloseReason::ClientClosed;
                }
            },

            _ = ticker.tick() => {
                if sink.send(Message::Ping(Bytes::new())).await.is_err() {
                    break CloseReason::SendFailed;
                }
            }
        }
    };

    drop(events);
    if reason == CloseReason::BusClosed {
        let _ = sink.send(Message::Close(None)).await;
    }
    let _ = sink.close().await;
    session.transition(GatewayState::Closed);

    tracing::info!(%conn_id, reason = ?reason, "WebSocket disconnected");
    reason
}
