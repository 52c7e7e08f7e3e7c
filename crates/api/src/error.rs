use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vetrina_core::error::CoreError;
use vetrina_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation and [`PipelineError`] for pipeline
/// faults. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vetrina-core` (request validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A fault surfaced by the signing pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::NotFound { .. } => {
                    (StatusCode::BAD_REQUEST, "NOT_FOUND", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Pipeline(pipeline) => match pipeline {
                PipelineError::Database(err) => {
                    tracing::error!(error = %err, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                // The legacy clients of this endpoint only distinguish
                // 200 from 400; the category travels in `code`.
                other => (StatusCode::BAD_REQUEST, other.code(), other.to_string()),
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
