use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use helpdesk_core::error::CoreError;
use helpdesk_store::StoreError;
use helpdesk_workflow::WorkflowError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain rejections and [`StoreError`] for failures
/// talking to the remote store. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `helpdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure of the remote store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Core(core) => Self::Core(core),
            WorkflowError::Store(store) => Self::Store(store),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Remote store errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - A 409 from the store maps to 409.
/// - Everything else means the upstream failed and maps to 502 with a
///   sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { collection, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{collection} with id {id} not found"),
        ),
        StoreError::Api { status: 409, body } => {
            (StatusCode::CONFLICT, "CONFLICT", body.clone())
        }
        other => {
            tracing::error!(error = %other, "Remote store error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The ticket store could not complete the request".to_string(),
            )
        }
    }
}
