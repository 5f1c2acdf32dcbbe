//! Query parameter types for the job endpoints.
//!
//! Values arrive as raw strings so that malformed input is reported with
//! this API's own error body instead of axum's plain-text rejection.

use serde::Deserialize;
use vidgen_core::error::CoreError;
use vidgen_core::query::JobListQuery;
use vidgen_core::types::JobId;

/// `?job_id=` for the status and video endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct JobIdParams {
    pub job_id: Option<String>,
}

/// Outcome of reading `job_id` from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobIdParam {
    Valid(JobId),
    /// Present but not a UUID, so no job can match it.
    Unknown,
}

impl JobIdParams {
    /// Missing or empty `job_id` is `InvalidRequest`.
    pub fn parse(&self) -> Result<JobIdParam, CoreError> {
        let raw = self
            .job_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::InvalidRequest("job_id is required".into()))?;

        Ok(match uuid::Uuid::parse_str(raw) {
            Ok(id) => JobIdParam::Valid(id),
            Err(_) => JobIdParam::Unknown,
        })
    }
}

/// `?status=&offset=&limit=` for the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> Result<JobListQuery, CoreError> {
        JobListQuery::from_params(
            self.status.as_deref(),
            self.offset.as_deref(),
            self.limit.as_deref(),
        )
    }
}
