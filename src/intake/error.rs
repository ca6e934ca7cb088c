//! Intake error definitions and their HTTP mapping.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while receiving an upload.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The multipart body could not be read or parsed.
    ///
    /// Carries the status chosen by the multipart layer: 4xx for malformed
    /// input, 413 for length limits, 5xx for body I/O failures.
    #[error("Multipart error: {message}")]
    Malformed { status: StatusCode, message: String },

    /// No file part was sent under the configured field name.
    #[error("Missing file field `{0}`")]
    MissingFile(String),

    /// A file part was sent under a field name other than the configured one.
    #[error("Unexpected file field `{0}`")]
    UnexpectedFile(String),

    /// More than one file part was sent under the configured field name.
    #[error("More than one file sent under `{0}`")]
    DuplicateFile(String),

    /// The file exceeded the configured size limit.
    #[error("File exceeds the {limit} byte limit")]
    FileTooLarge { limit: u64 },

    /// Writing the temporary upload failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

impl IntakeError {
    /// HTTP status this error is surfaced as.
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::Malformed { status, .. } => *status,
            IntakeError::MissingFile(_)
            | IntakeError::UnexpectedFile(_)
            | IntakeError::DuplicateFile(_) => StatusCode::BAD_REQUEST,
            IntakeError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            IntakeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for IntakeError {
    fn from(err: MultipartError) -> Self {
        IntakeError::Malformed {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for IntakeError {
    fn from(rejection: MultipartRejection) -> Self {
        IntakeError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Upload failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Upload rejected");
        }
        (status, self.to_string()).into_response()
    }
}
