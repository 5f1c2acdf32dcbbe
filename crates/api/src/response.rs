//! Success response bodies for the job endpoints.
//!
//! Field names are part of the client contract.

use serde::Serialize;
use vidgen_core::job::Job;
use vidgen_core::types::JobId;

/// `POST /api/submit`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub job_id: JobId,
}

/// `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub job_status: String,
}

/// `GET /api/list`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub jobs: Vec<Job>,
}

/// `GET /api/video`.
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub url: String,
}
