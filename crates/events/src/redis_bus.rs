//! Event bus over Redis pub/sub.

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::bus::{EventBus, EventError, EventStream};

/// Redis-backed bus.
///
/// Publishing goes through one multiplexed connection shared by every
/// caller. Each subscription opens its own pub/sub connection, which is
/// closed when the returned stream is dropped.
#[derive(Clone)]
pub struct RedisEventBus {
    client: redis::Client,
    publisher: MultiplexedConnection,
}

impl RedisEventBus {
    /// Open the client and the shared publishing connection.
    pub async fn connect(redis_url: &str) -> Result<Self, EventError> {
        let client = redis::Client::open(redis_url)?;
        let publisher = client.get_multiplexed_async_connection().await?;
        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl EventBus for RedisEventBus {
    async fn publish(&self, channel: &str, payload: String) -> Result<usize, EventError> {
        let mut conn = self.publisher.clone();
        let receivers: usize = conn.publish(channel, payload).await?;
        tracing::debug!(%channel, receivers, "Published event");
        Ok(receivers)
    }

    async fn subscribe(&self, channel: &str) -> Result<EventStream, EventError> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;
        tracing::debug!(%channel, "Subscribed");

        let stream = pubsub.into_on_message().filter_map(|msg| async move {
            match msg.get_payload::<String>() {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!(
                        channel = %msg.get_channel_name(),
                        error = %e,
                        "Dropping non-text event payload",
                    );
                    None
                }
            }
        });

        Ok(stream.boxed())
    }

    async fn ping(&self) -> Result<(), EventError> {
        let mut conn = self.publisher.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
