use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidgen_core::error::CoreError;
use vidgen_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`StoreError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// server-side failures are logged in full and reported to the client with
/// a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidgen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A job store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error. The message is sent to the client as is, so it
    /// must stay generic; log the detail before constructing it.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Attach a client-facing message to storage failures, keeping every
    /// other variant as is. Used so each endpoint reports its own wording
    /// ("Failed to create job", "Failed to list jobs", ...).
    pub fn storage_context(self, message: &str) -> Self {
        match self {
            AppError::Store(StoreError::Database(e)) => {
                tracing::error!(error = %e, "{message}");
                AppError::InternalError(message.to_string())
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                ),
                CoreError::Storage(msg) | CoreError::Notification(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal("An internal error occurred")
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::NotFound { entity, .. }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
            ),
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal("An internal error occurred")
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(message: &str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        message.to_string(),
    )
}
