//! The event bus contract shared by the Redis and in-memory buses.

use async_trait::async_trait;
use futures::stream::BoxStream;
use vidgen_core::error::CoreError;

/// Channel carrying every newly submitted job, consumed by the video worker.
pub const DEFAULT_NEW_JOB_CHANNEL: &str = "video_jobs";

/// Channel on which the video worker announces status changes.
pub const DEFAULT_STATUS_CHANNEL: &str = "job_updates";

/// Lazy, unbounded stream of raw payloads from one subscription.
///
/// The stream ends when the underlying connection closes and cannot be
/// restarted; dropping it releases the subscription.
pub type EventStream = BoxStream<'static, String>;

/// Failure talking to the event bus.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Event bus closed: {0}")]
    Closed(String),
}

impl From<EventError> for CoreError {
    fn from(err: EventError) -> Self {
        CoreError::Notification(err.to_string())
    }
}

/// Names of the two channels the API uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channels {
    pub new_job: String,
    pub status: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            new_job: DEFAULT_NEW_JOB_CHANNEL.to_string(),
            status: DEFAULT_STATUS_CHANNEL.to_string(),
        }
    }
}

/// Fire-and-forget publish/subscribe over named channels.
///
/// Delivery is best-effort: there is no persistence, replay or ordering
/// guarantee beyond what the backing transport provides.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish a payload. Returns how many subscribers received it.
    async fn publish(&self, channel: &str, payload: String) -> Result<usize, EventError>;

    /// Open a new subscription to `channel`.
    async fn subscribe(&self, channel: &str) -> Result<EventStream, EventError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), EventError>;
}
