use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use resume_export::{ExportArtifact, ExportFormat, Exporter, SaveError, SaveTarget};
use resume_model::ResumeData;

use crate::errors::{AppError, AppJson};
use crate::state::AppState;

/// Hands the artifact back so the handler can send it as a download
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentSaver;

impl SaveTarget for AttachmentSaver {
    type Receipt = ExportArtifact;

    fn save(&self, artifact: ExportArtifact) -> Result<ExportArtifact, SaveError> {
        if artifact.is_empty() {
            return Err(SaveError::EmptyArtifact(artifact.format.label()));
        }
        Ok(artifact)
    }
}

/// POST /api/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    AppJson(data): AppJson<ResumeData>,
) -> Result<Response, AppError> {
    export(state, ExportFormat::Pdf, data).await
}

/// POST /api/export/docx
pub async fn handle_export_docx(
    State(state): State<AppState>,
    AppJson(data): AppJson<ResumeData>,
) -> Result<Response, AppError> {
    export(state, ExportFormat::Docx, data).await
}

async fn export(state: AppState, format: ExportFormat, data: ResumeData) -> Result<Response, AppError> {
    data.validate()?;

    // Rendering is CPU-bound; keep it off the async workers
    let settings = state.export_settings.clone();
    let artifact = tokio::task::spawn_blocking(move || {
        Exporter::new((*settings).clone(), AttachmentSaver).export(format, &data)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(attachment(artifact))
}

fn attachment(artifact: ExportArtifact) -> Response {
    let headers = [
        (header::CONTENT_TYPE, artifact.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename()),
        ),
    ];
    (headers, artifact.bytes).into_response()
}
