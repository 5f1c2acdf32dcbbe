//! In-process [`JobStore`] with the same semantics as the Postgres store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use vidgen_core::job::{Job, JobStatus};
use vidgen_core::query::JobListQuery;
use vidgen_core::types::JobId;

use crate::store::{JobStore, StoreError};

/// Jobs kept in insertion order behind an async `RwLock`.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status transition the way the video worker does, refreshing
    /// `updated_at`. Returns the updated job.
    pub async fn set_status(
        &self,
        id: JobId,
        status: &str,
        video_url: Option<&str>,
        error: Option<&str>,
    ) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| StoreError::job_not_found(id))?;

        job.status = status.to_string();
        if let Some(url) = video_url {
            job.video_url = Some(url.to_string());
        }
        if let Some(err) = error {
            job.error = Some(err.to_string());
        }
        job.updated_at = chrono::Utc::now();
        Ok(job.clone())
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: &Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|j| j.id == job.id) {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "duplicate job id {}",
                job.id
            ))));
        }
        jobs.push(job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Job, StoreError> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| StoreError::job_not_found(id))
    }

    async fn list(&self, query: &JobListQuery) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;

        // Later insertions win ties on equal timestamps.
        let mut matching: Vec<(usize, &Job)> = jobs
            .iter()
            .enumerate()
            .filter(|(_, j)| query.status.as_deref().is_none_or(|s| j.status == s))
            .collect();
        matching.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, j)| j.clone())
            .collect())
    }

    async fn get_video_url(&self, id: JobId) -> Result<String, StoreError> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|j| j.id == id && j.has_status(JobStatus::Completed))
            .and_then(|j| j.video_url.clone())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| StoreError::video_not_found(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
