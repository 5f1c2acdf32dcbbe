//! Durable-write-then-notify submission of new jobs.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use vidgen_core::job::Job;
use vidgen_db::{JobStore, StoreError};
use vidgen_events::EventBus;

/// What happened to the new-job notification.
///
/// Never fails a submission: the job is already durable when this is
/// decided, so the worker can still find it in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Published; `receivers` subscribers got it (zero means nobody was
    /// listening on the channel).
    Delivered { receivers: usize },
    /// Serialisation or transport failure.
    Failed { reason: String },
}

/// A persisted job plus the outcome of announcing it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub job: Job,
    pub notify: NotifyOutcome,
}

/// Create a `pending` job for `prompt` and announce it on `channel`.
///
/// Step one writes the job to `store`; a failure there aborts with the
/// store error and nothing is published. Step two publishes the full job
/// JSON to `bus`; its result is captured in [`Submission::notify`].
pub async fn submit(
    store: &dyn JobStore,
    bus: &dyn EventBus,
    channel: &str,
    prompt: &str,
) -> Result<Submission, StoreError> {
    let job = Job::new_pending(prompt);
    store.create(&job).await?;

    let notify = match serde_json::to_string(&job) {
        Ok(payload) => match bus.publish(channel, payload).await {
            Ok(receivers) => NotifyOutcome::Delivered { receivers },
            Err(e) => NotifyOutcome::Failed {
                reason: e.to_string(),
            },
        },
        Err(e) => NotifyOutcome::Failed {
            reason: e.to_string(),
        },
    };

    Ok(Submission { job, notify })
}

/// Process-wide counters of new-job notification outcomes.
#[derive(Debug, Default)]
pub struct PublishStats {
    delivered: AtomicU64,
    unheard: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`PublishStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishSnapshot {
    pub delivered: u64,
    /// Published, but no subscriber was listening.
    pub unheard: u64,
    pub failed: u64,
}

impl PublishStats {
    pub fn record(&self, outcome: &NotifyOutcome) {
        let counter = match outcome {
            NotifyOutcome::Delivered { receivers: 0 } => &self.unheard,
            NotifyOutcome::Delivered { .. } => &self.delivered,
            NotifyOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PublishSnapshot {
        PublishSnapshot {
            delivered: self.delivered.load(Ordering::Relaxed),
            unheard: self.unheard.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
