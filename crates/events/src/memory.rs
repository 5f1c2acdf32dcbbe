//! In-process event bus backed by `tokio::sync::broadcast` channels.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::broadcast;

use crate::bus::{EventBus, EventError, EventStream};

/// Default buffer capacity for each channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus with one broadcast channel per name.
///
/// Channels are created lazily on first publish or subscribe. Publishing
/// to a channel with no subscribers drops the payload and reports zero
/// receivers, matching Redis `PUBLISH`.
pub struct MemoryEventBus {
    capacity: usize,
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl MemoryEventBus {
    /// Create a bus with a specific per-channel capacity.
    ///
    /// When a buffer is full the oldest unconsumed payloads are dropped and
    /// slow subscribers skip ahead.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: Mutex::new(HashMap::new()),
        }
    }

    fn sender(&self, channel: &str) -> Result<broadcast::Sender<String>, EventError> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|_| EventError::Closed("channel registry poisoned".into()))?;
        Ok(channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone())
    }

    /// Number of live subscriptions on `channel`.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .lock()
            .ok()
            .and_then(|channels| channels.get(channel).map(|tx| tx.receiver_count()))
            .unwrap_or(0)
    }
}

impl Default for MemoryEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EventBus for MemoryEventBus {
    async fn publish(&self, channel: &str, payload: String) -> Result<usize, EventError> {
        // A SendError only means there are zero receivers.
        Ok(self.sender(channel)?.send(payload).unwrap_or(0))
    }

    async fn subscribe(&self, channel: &str) -> Result<EventStream, EventError> {
        let rx = self.sender(channel)?.subscribe();
        let channel = channel.to_string();

        let stream = futures::stream::unfold(rx, move |mut rx| {
            let channel = channel.clone();
            async move {
                loop {
                    match rx.recv().await {
                        Ok(payload) => return Some((payload, rx)),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(%channel, skipped, "Subscriber lagged, events dropped");
                        }
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            }
        });

        Ok(stream.boxed())
    }

    async fn ping(&self) -> Result<(), EventError> {
        Ok(())
    }
}
