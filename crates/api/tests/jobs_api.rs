//! Integration tests for the job submission and query endpoints.
//!
//! Requests go through the production router and middleware; the store and
//! event bus are the in-memory implementations.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_app_with, build_test_app, get, post_json, post_raw, submit};
use futures::StreamExt;
use serde_json::json;
use vidgen_db::{JobStore, MemoryJobStore};
use vidgen_events::{EventBus, MemoryEventBus};

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_returns_job_id_and_status_is_pending() {
    let app = build_test_app();

    let job_id = submit(&app.router, "a cat on a skateboard").await;

    let response = get(app.router, &format!("/api/status?job_id={job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "job_status": "pending" }));
}

#[tokio::test]
async fn submit_returns_unique_ids() {
    let app = build_test_app();

    let first = submit(&app.router, "same prompt").await;
    let second = submit(&app.router, "same prompt").await;

    assert_ne!(first, second);
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn submit_publishes_full_job_on_new_job_channel() {
    let app = build_test_app();
    let mut new_jobs = app.bus.subscribe("video_jobs").await.unwrap();

    let job_id = submit(&app.router, "a lighthouse at dusk").await;

    let payload: serde_json::Value =
        serde_json::from_str(&new_jobs.next().await.unwrap()).unwrap();
    assert_eq!(payload["job_id"], job_id);
    assert_eq!(payload["prompt"], "a lighthouse at dusk");
    assert_eq!(payload["job_status"], "pending");
    assert!(payload["created_at"].is_string());
    assert!(payload["updated_at"].is_string());
    assert!(payload.get("video_url").is_none());
    assert!(payload.get("error").is_none());
}

#[tokio::test]
async fn submit_with_empty_prompt_is_rejected_without_record() {
    let app = build_test_app();

    let response = post_json(app.router.clone(), "/api/submit", json!({ "prompt": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn submit_with_missing_prompt_is_rejected() {
    let app = build_test_app();

    let response = post_json(app.router.clone(), "/api/submit", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn submit_with_malformed_json_is_rejected() {
    let app = build_test_app();

    let response = post_raw(app.router.clone(), "/api/submit", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn submit_succeeds_when_publish_fails() {
    let store = Arc::new(MemoryJobStore::new());
    let app = build_app_with(store.clone(), Arc::new(common::FailingBus));

    let job_id = submit(&app, "still saved").await;

    let id = uuid::Uuid::parse_str(&job_id).unwrap();
    assert_eq!(store.get_by_id(id).await.unwrap().prompt, "still saved");
}

#[tokio::test]
async fn submit_reports_storage_failure_as_500() {
    let app = build_app_with(
        Arc::new(common::FailingStore),
        Arc::new(MemoryEventBus::default()),
    );

    let response = post_json(app, "/api/submit", json!({ "prompt": "lost" })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to create job");
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_without_job_id_is_400() {
    let app = build_test_app();

    let response = get(app.router, "/api/status").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "job_id is required");
}

#[tokio::test]
async fn status_for_unknown_id_is_404() {
    let app = build_test_app();

    let unknown = uuid::Uuid::new_v4();
    let response = get(app.router.clone(), &format!("/api/status?job_id={unknown}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Job not found");

    let response = get(app.router, "/api/status?job_id=not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_storage_failure_is_500() {
    let app = build_app_with(
        Arc::new(common::FailingStore),
        Arc::new(MemoryEventBus::default()),
    );

    let response = get(app, &format!("/api/status?job_id={}", uuid::Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to get job status");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_two_most_recent_of_five() {
    let app = build_test_app();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(submit(&app.router, &format!("prompt {i}")).await);
    }

    let response = get(app.router, "/api/list?limit=2&offset=0").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["job_id"], ids[4]);
    assert_eq!(jobs[1]["job_id"], ids[3]);
}

#[tokio::test]
async fn list_defaults_to_ten_newest_first() {
    let app = build_test_app();
    for i in 0..12 {
        submit(&app.router, &format!("prompt {i}")).await;
    }

    let body = body_json(get(app.router, "/api/list").await).await;
    let jobs = body["jobs"].as_array().unwrap();

    assert_eq!(jobs.len(), 10);
    let created: Vec<&str> = jobs
        .iter()
        .map(|j| j["created_at"].as_str().unwrap())
        .collect();
    let parsed: Vec<chrono::DateTime<chrono::Utc>> =
        created.iter().map(|c| c.parse().unwrap()).collect();
    assert!(parsed.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(jobs[0]["prompt"], "prompt 11");
}

#[tokio::test]
async fn list_with_zero_limit_is_empty() {
    let app = build_test_app();
    submit(&app.router, "something").await;

    let response = get(app.router, "/api/list?limit=0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "jobs": [] }));
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = build_test_app();

    let body = body_json(get(app.router, "/api/list").await).await;

    assert_eq!(body, json!({ "jobs": [] }));
}

#[tokio::test]
async fn list_filters_by_status() {
    let app = build_test_app();
    let done = submit(&app.router, "done").await;
    submit(&app.router, "waiting").await;
    app.store
        .set_status(
            uuid::Uuid::parse_str(&done).unwrap(),
            "completed",
            Some("https://x/done.mp4"),
            None,
        )
        .await
        .unwrap();

    let filtered = body_json(get(app.router.clone(), "/api/list?status=completed").await).await;
    let unfiltered = body_json(get(app.router, "/api/list").await).await;

    let filtered = filtered["jobs"].as_array().unwrap();
    let unfiltered = unfiltered["jobs"].as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["job_id"], done);
    assert_eq!(filtered[0]["video_url"], "https://x/done.mp4");
    assert!(filtered.iter().all(|f| unfiltered.contains(f)));
}

#[tokio::test]
async fn list_status_filter_is_exact() {
    let app = build_test_app();
    let done = submit(&app.router, "done").await;
    app.store
        .set_status(
            uuid::Uuid::parse_str(&done).unwrap(),
            "completed",
            Some("https://x/done.mp4"),
            None,
        )
        .await
        .unwrap();

    let padded = body_json(get(app.router.clone(), "/api/list?status=%20completed").await).await;
    let cased = body_json(get(app.router, "/api/list?status=Completed").await).await;

    assert_eq!(padded, json!({ "jobs": [] }));
    assert_eq!(cased, json!({ "jobs": [] }));
}

#[tokio::test]
async fn list_rejects_malformed_pagination() {
    let app = build_test_app();

    let response = get(app.router.clone(), "/api/list?offset=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid offset");

    let response = get(app.router, "/api/list?limit=1.5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid limit");
}

#[tokio::test]
async fn list_storage_failure_is_500() {
    let app = build_app_with(
        Arc::new(common::FailingStore),
        Arc::new(MemoryEventBus::default()),
    );

    let response = get(app, "/api/list").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to list jobs");
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn video_without_job_id_is_400() {
    let app = build_test_app();

    let response = get(app.router, "/api/video?job_id=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn video_for_pending_job_is_404() {
    let app = build_test_app();
    let job_id = submit(&app.router, "not yet").await;

    let response = get(app.router, &format!("/api/video?job_id={job_id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Video not found");
}

#[tokio::test]
async fn video_for_failed_job_with_url_is_404() {
    let app = build_test_app();
    let job_id = submit(&app.router, "broken").await;
    app.store
        .set_status(
            uuid::Uuid::parse_str(&job_id).unwrap(),
            "failed",
            Some("https://x/partial.mp4"),
            Some("encoder crashed"),
        )
        .await
        .unwrap();

    let response = get(app.router, &format!("/api/video?job_id={job_id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn video_for_unknown_id_is_404() {
    let app = build_test_app();

    let response = get(
        app.router,
        &format!("/api/video?job_id={}", uuid::Uuid::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_poll_complete_fetch_video() {
    let app = build_test_app();

    let job_id = submit(&app.router, "a cat on a skateboard").await;

    let status = body_json(get(app.router.clone(), &format!("/api/status?job_id={job_id}")).await).await;
    assert_eq!(status["job_status"], "pending");

    // The external worker finishes the job.
    app.store
        .set_status(
            uuid::Uuid::parse_str(&job_id).unwrap(),
            "completed",
            Some("https://x/video.mp4"),
            None,
        )
        .await
        .unwrap();

    let response = get(app.router, &format!("/api/video?job_id={job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "url": "https://x/video.mp4" }));
}
