use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gongryak_core::error::CoreError;
use gongryak_core::form::DUPLICATE_NOTICE;
use gongryak_sheets::SubmitError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`SubmitError`] for store
/// failures, plus HTTP-specific variants. Every variant renders as
/// `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The session store could not load or save the participant identifier.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The identifier already has a recorded submission.
    #[error("Duplicate submission")]
    Duplicate,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // Store details are logged, never returned.
            AppError::Submit(SubmitError::CheckFailed(err)) => {
                tracing::error!(error = %err, "Duplicate check unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DUPLICATE_CHECK_UNAVAILABLE",
                    "Could not verify earlier participation, please try again later".to_string(),
                )
            }
            AppError::Submit(SubmitError::AppendFailed(err)) => {
                tracing::error!(error = %err, "Submission store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Could not save the submission, please try again later".to_string(),
                )
            }

            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store error");
                internal()
            }

            AppError::Duplicate => (
                StatusCode::CONFLICT,
                "DUPLICATE_SUBMISSION",
                DUPLICATE_NOTICE.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
