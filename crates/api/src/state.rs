use std::sync::Arc;

use vidgen_db::JobStore;
use vidgen_events::EventBus;

use crate::config::ServerConfig;
use crate::engine::PublishStats;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`). The store and
/// bus are trait objects so tests can inject in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    /// Persistent job store.
    pub store: Arc<dyn JobStore>,
    /// Event bus used for new-job notifications and live updates.
    pub bus: Arc<dyn EventBus>,
    /// Server configuration (channel names, heartbeat interval).
    pub config: Arc<ServerConfig>,
    /// Counters of new-job notification outcomes.
    pub publish_stats: Arc<PublishStats>,
}

impl AppState {
    pub fn new(store: Arc<dyn JobStore>, bus: Arc<dyn EventBus>, config: ServerConfig) -> Self {
        Self {
            store,
            bus,
            config: Arc::new(config),
            publish_stats: Arc::new(PublishStats::default()),
        }
    }
}
