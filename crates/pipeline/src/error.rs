//! Pipeline fault taxonomy.
//!
//! Every variant carries the user-facing message for its category; the
//! HTTP layer renders message plus category code and nothing internal.
//! `Transaction` means the recording transaction was rolled back -- the
//! blob uploaded just before it is NOT removed, which is an accepted
//! orphan-object risk rather than something the pipeline reconciles.

use vetrina_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Malformed or out-of-enum input. Checked before any side effect.
    #[error("{0}")]
    Validation(String),

    /// Property, photo record, or blob absent.
    #[error("{0}")]
    NotFound(String),

    /// Network or permission failure on blob get/put. Not retried here.
    #[error("{0}")]
    Storage(String),

    /// Image decode/encode failure. Fatal for the invocation.
    #[error("{0}")]
    Processing(String),

    /// A statement inside the recording transaction failed; the relational
    /// change was rolled back.
    #[error("{0}")]
    Transaction(String),

    /// Database failure outside the recording transaction (lookups).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other @ CoreError::NotFound { .. } => Self::NotFound(other.to_string()),
            CoreError::Internal(msg) => Self::Processing(msg),
        }
    }
}

impl PipelineError {
    /// Stable category code used in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_FAULT",
            Self::Processing(_) => "PROCESSING_FAULT",
            Self::Transaction(_) => "UPDATE_FAILED",
            Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}
