//! Handlers for the job submission and query endpoints.
//!
//! Each handler validates its input before touching the store. Storage
//! failures are logged here and reported to the client generically.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;
use vidgen_core::error::CoreError;
use vidgen_core::job::SubmitJobRequest;

use crate::engine::{self, NotifyOutcome};
use crate::error::{AppError, AppResult};
use crate::query::{JobIdParam, JobIdParams, ListParams};
use crate::response::{ListResponse, StatusResponse, SubmitResponse, VideoResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/submit
///
/// Persist a new `pending` job and announce it to the video worker.
/// Responds with the new id even when the announcement fails.
pub async fn submit_job(
    State(state): State<AppState>,
    body: Result<Json<SubmitJobRequest>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected submit body");
        invalid_body()
    })?;
    input.validate().map_err(|_| invalid_body())?;

    let submission = engine::submit(
        state.store.as_ref(),
        state.bus.as_ref(),
        &state.config.channels.new_job,
        &input.prompt,
    )
    .await
    .map_err(|e| AppError::from(e).storage_context("Failed to create job"))?;

    let job_id = submission.job.id;
    match &submission.notify {
        NotifyOutcome::Delivered { receivers: 0 } => {
            tracing::warn!(%job_id, "Job published but no worker is subscribed");
        }
        NotifyOutcome::Delivered { receivers } => {
            tracing::debug!(%job_id, receivers, "Job published");
        }
        NotifyOutcome::Failed { reason } => {
            tracing::error!(%job_id, error = %reason, "Failed to publish job");
        }
    }
    state.publish_stats.record(&submission.notify);

    tracing::info!(%job_id, "Job submitted");
    Ok(Json(SubmitResponse { job_id }))
}

fn invalid_body() -> AppError {
    AppError::BadRequest("Invalid request body".into())
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/status?job_id=
pub async fn get_job_status(
    State(state): State<AppState>,
    params: Result<Query<JobIdParams>, QueryRejection>,
) -> AppResult<Json<StatusResponse>> {
    let id = match read_job_id(params)? {
        JobIdParam::Valid(id) => id,
        JobIdParam::Unknown => return Err(not_found("Job")),
    };

    let job = state
        .store
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from(e).storage_context("Failed to get job status"))?;

    Ok(Json(StatusResponse {
        job_status: job.status,
    }))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/list?status=&offset=&limit=
///
/// Newest jobs first. An empty page is a normal result.
pub async fn list_jobs(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<ListResponse>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let query = params.to_query()?;

    let jobs = state
        .store
        .list(&query)
        .await
        .map_err(|e| AppError::from(e).storage_context("Failed to list jobs"))?;

    Ok(Json(ListResponse { jobs }))
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

/// GET /api/video?job_id=
///
/// Only completed jobs with a non-empty URL have a video.
pub async fn get_video(
    State(state): State<AppState>,
    params: Result<Query<JobIdParams>, QueryRejection>,
) -> AppResult<Json<VideoResponse>> {
    let id = match read_job_id(params)? {
        JobIdParam::Valid(id) => id,
        JobIdParam::Unknown => return Err(not_found("Video")),
    };

    let url = state
        .store
        .get_video_url(id)
        .await
        .map_err(|e| AppError::from(e).storage_context("Failed to get video"))?;

    Ok(Json(VideoResponse { url }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_job_id(params: Result<Query<JobIdParams>, QueryRejection>) -> AppResult<JobIdParam> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(params.parse()?)
}

/// Ids that are not UUIDs can never match a stored job.
fn not_found(entity: &'static str) -> AppError {
    CoreError::NotFound {
        entity,
        id: String::new(),
    }
    .into()
}
