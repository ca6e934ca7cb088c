//! Route handlers.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;

use crate::http::server::AppState;
use crate::intake::IntakeError;
use crate::observability::metrics;

/// Body returned by `GET /`.
pub const GREETING: &str = "Hello Hubdoc!";

pub async fn greeting() -> &'static str {
    GREETING
}

/// Accept one multipart upload and acknowledge it with an empty 200.
///
/// The parsed form is dropped before the response is sent, which deletes
/// any temporary file the upload was streamed into.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, IntakeError> {
    let result = match multipart {
        Ok(multipart) => state.parser.parse(multipart).await,
        Err(rejection) => Err(rejection.into()),
    };

    let form = match result {
        Ok(form) => form,
        Err(err) => {
            let outcome = if err.status().is_server_error() {
                "failed"
            } else {
                "rejected"
            };
            metrics::record_upload(outcome, None);
            return Err(err);
        }
    };

    let field_names: Vec<&str> = form.fields.names().collect();
    match &form.file {
        Some(file) => tracing::info!(
            file_name = file.file_name.as_deref().unwrap_or(""),
            content_type = file.content_type.as_deref().unwrap_or(""),
            size = file.size,
            on_disk = file.contents.path().is_some(),
            fields = ?field_names,
            "Upload received"
        ),
        None => tracing::info!(
            fields = ?field_names,
            "Form received without file"
        ),
    }

    metrics::record_upload("accepted", Some(form.file_size()));
    drop(form);

    Ok(StatusCode::OK)
}
