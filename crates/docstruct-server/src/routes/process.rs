//! Document upload and processing endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use docstruct_core::ProcessingResult;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Process an uploaded document.
/// POST /process (multipart, `file` field)
///
/// Enforces the upload size limit before the core is invoked. The
/// payload is written to a scratch file that is removed best-effort
/// after processing, on success and failure alike.
pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProcessingResult>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("invalid multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        let declared_type = field.content_type().map(str::to_string);

        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(format!("failed to read upload: {err}")))?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(ApiError::payload_too_large(format!(
                "File too large. Maximum size is {}",
                state.config.max_upload_display()
            )));
        }

        let file_type = resolve_content_type(declared_type.as_deref(), &filename);

        let scratch = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = NamedTempFile::new()?;
            file.write_all(&bytes)?;
            Ok(file)
        })
        .await
        .map_err(|err| ApiError::internal(format!("scratch task failed: {err}")))?
        .map_err(|err| ApiError::internal(format!("failed to write scratch file: {err}")))?;

        let result = state
            .processor
            .process(scratch.path(), &file_type, &filename)
            .await;

        if let Err(err) = scratch.close() {
            warn!(error = %err, "failed to remove scratch file");
        }

        return result.map(Json).map_err(ApiError::from);
    }

    Err(ApiError::bad_request("multipart field 'file' is required"))
}

/// Resolve the MIME type the core should see: the declared multipart
/// content type when meaningful, otherwise a guess from the filename.
fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared {
        Some(mime) if mime != "application/octet-stream" => mime.to_string(),
        _ => mime_guess::from_path(filename)
            .first_raw()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    }
}
