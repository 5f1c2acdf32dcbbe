//! Postgres implementation of [`JobStore`] for the `jobs` table.

use async_trait::async_trait;
use sqlx::FromRow;
use vidgen_core::job::{Job, JobStatus};
use vidgen_core::query::JobListQuery;
use vidgen_core::types::{JobId, Timestamp};

use crate::store::{JobStore, StoreError};
use crate::DbPool;

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, prompt, status, created_at, updated_at, video_url, error";

/// A row from the `jobs` table.
#[derive(Debug, FromRow)]
struct JobRow {
    id: JobId,
    prompt: String,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    video_url: Option<String>,
    error: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            prompt: row.prompt,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            video_url: row.video_url,
            error: row.error,
        }
    }
}

/// Job store over a shared sqlx connection pool.
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, job: &Job) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO jobs (id, prompt, status, created_at, updated_at, video_url, error) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(job.id)
        .bind(&job.prompt)
        .bind(&job.status)
        .bind(job.created_at)
        .bind(job.updated_at)
        .bind(&job.video_url)
        .bind(&job.error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Job, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Job::from)
            .ok_or_else(|| StoreError::job_not_found(id))
    }

    async fn list(&self, query: &JobListQuery) -> Result<Vec<Job>, StoreError> {
        let rows = match &query.status {
            Some(status) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM jobs WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, JobRow>(&sql)
                    .bind(status)
                    .bind(query.limit)
                    .bind(query.offset)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM jobs ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, JobRow>(&sql)
                    .bind(query.limit)
                    .bind(query.offset)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn get_video_url(&self, id: JobId) -> Result<String, StoreError> {
        let url: Option<Option<String>> =
            sqlx::query_scalar("SELECT video_url FROM jobs WHERE id = $1 AND status = $2")
                .bind(id)
                .bind(JobStatus::Completed.as_str())
                .fetch_optional(&self.pool)
                .await?;

        url.flatten()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| StoreError::video_not_found(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
