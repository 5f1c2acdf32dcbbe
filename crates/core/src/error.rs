/// Domain error taxonomy shared by every layer.
///
/// `InvalidRequest` and `NotFound` are client-facing; `Storage` and
/// `Notification` carry internal detail that must only reach the log.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification error: {0}")]
    Notification(String),
}
