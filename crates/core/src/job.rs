//! The `Job` entity and its wire representation.
//!
//! Field names on the wire (`job_id`, `job_status`, ...) are part of the
//! client contract and are shared with the external video worker.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{JobId, Timestamp};

/// Status vocabulary used by this service and the video worker.
///
/// Only `Pending` is ever written here; the other states are set by the
/// worker. The `status` column stores the plain string so values outside
/// this enum are still read back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One video-generation request and its tracked lifecycle state.
///
/// Deserialization is lenient so the worker's status-update payload
/// (`{job_id, status, video_url, error}`) parses as a `Job` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "job_id")]
    pub id: JobId,
    #[serde(default)]
    pub prompt: String,
    #[serde(rename = "job_status", alias = "status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub error: Option<String>,
}

impl Job {
    /// Build a freshly submitted job with a new id and `pending` status.
    pub fn new_pending(prompt: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            prompt: prompt.into(),
            status: JobStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
            video_url: None,
            error: None,
        }
    }

    pub fn has_status(&self, status: JobStatus) -> bool {
        self.status == status.as_str()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Body of `POST /api/submit`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitJobRequest {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
}
