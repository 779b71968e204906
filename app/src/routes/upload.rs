use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use resume_export::{encode_data_uri, ImageFormat};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/upload
///
/// Turns the multipart `file` field into a data URI.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let declared = field
            .content_type()
            .map(str::trim)
            .filter(|mime| !mime.is_empty() && *mime != "application/octet-stream")
            .map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            break;
        }
        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {limit} byte limit"
            )));
        }

        let mime = declared.unwrap_or_else(|| ImageFormat::from_bytes(&bytes).mime_type().to_string());
        tracing::debug!(bytes = bytes.len(), mime = %mime, "File uploaded");
        return Ok(Json(UploadResponse {
            url: encode_data_uri(&mime, &bytes),
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}
