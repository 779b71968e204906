pub mod export;
pub mod health;
pub mod resume;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let json_limit = state.config.max_json_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume CRUD
        .route("/api/resume", post(resume::handle_create))
        .route(
            "/api/resume/:id",
            get(resume::handle_get).put(resume::handle_update),
        )
        // Export downloads
        .route("/api/export/pdf", post(export::handle_export_pdf))
        .route("/api/export/docx", post(export::handle_export_docx))
        .layer(DefaultBodyLimit::max(json_limit))
        // Image upload
        .route(
            "/api/upload",
            post(upload::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
