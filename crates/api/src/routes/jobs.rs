//! Route definitions for the job endpoints, mounted under `/api`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(jobs::submit_job))
        .route("/status", get(jobs::get_job_status))
        .route("/list", get(jobs::list_jobs))
        .route("/video", get(jobs::get_video))
}
