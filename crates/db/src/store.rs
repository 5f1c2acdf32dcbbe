//! The job store contract.

use async_trait::async_trait;
use vidgen_core::error::CoreError;
use vidgen_core::job::Job;
use vidgen_core::query::JobListQuery;
use vidgen_core::types::JobId;

/// Failure of a job store operation.
///
/// `NotFound` is a tagged outcome so callers never have to inspect a
/// driver-specific "no rows" sentinel.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn job_not_found(id: JobId) -> Self {
        StoreError::NotFound {
            entity: "Job",
            id: id.to_string(),
        }
    }

    pub fn video_not_found(id: JobId) -> Self {
        StoreError::NotFound {
            entity: "Video",
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            StoreError::Database(e) => CoreError::Storage(e.to_string()),
        }
    }
}

/// Durable storage for job records, keyed by job id.
///
/// Implementations must be safe for concurrent use; the API holds one
/// instance behind an `Arc` for the whole process.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job. Fails if the id already exists.
    async fn create(&self, job: &Job) -> Result<(), StoreError>;

    /// Fetch a job by id.
    async fn get_by_id(&self, id: JobId) -> Result<Job, StoreError>;

    /// List jobs newest first, optionally filtered by exact status.
    async fn list(&self, query: &JobListQuery) -> Result<Vec<Job>, StoreError>;

    /// Result URL of a completed job.
    ///
    /// A missing job, a job in any other status, and a completed job with
    /// an empty URL all yield `NotFound`.
    async fn get_video_url(&self, id: JobId) -> Result<String, StoreError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
