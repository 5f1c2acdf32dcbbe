//! vidgen event bus client.
//!
//! This crate provides the publish/subscribe seam between the API and the
//! external video worker:
//!
//! - [`EventBus`]: the trait handlers depend on.
//! - [`RedisEventBus`]: Redis pub/sub, used in production.
//! - [`MemoryEventBus`]: in-process fan-out backed by
//!   `tokio::sync::broadcast`, used in tests.
//! - [`Channels`]: the "new job" and "status update" channel names.

pub mod bus;
pub mod memory;
pub mod redis_bus;

pub use bus::{Channels, EventBus, EventError, EventStream};
pub use memory::MemoryEventBus;
pub use redis_bus::RedisEventBus;
