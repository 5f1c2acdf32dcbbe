//! Live Update Gateway.
//!
//! Bridges the event bus "status update" channel to WebSocket clients.
//! Every connection receives every update; there is no per-job filtering.

mod gateway;
mod handler;

pub use gateway::{run_session, CloseReason, GatewayState};
pub use handler::ws_handler;
