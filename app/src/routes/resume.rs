use axum::{
    extract::{Path, State},
    Json,
};
use resume_model::ResumeData;

use crate::errors::{AppError, AppJson};
use crate::state::AppState;
use crate::storage::StoredResume;

/// POST /api/resume
pub async fn handle_create(
    State(state): State<AppState>,
    AppJson(data): AppJson<ResumeData>,
) -> Result<Json<StoredResume>, AppError> {
    data.validate()?;
    let stored = state.storage.create_resume(data)?;
    tracing::debug!(id = stored.id, "Resume created");
    Ok(Json(stored))
}

/// GET /api/resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StoredResume>, AppError> {
    state
        .storage
        .get_resume(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// PUT /api/resume/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    AppJson(data): AppJson<ResumeData>,
) -> Result<Json<StoredResume>, AppError> {
    data.validate()?;
    Ok(Json(state.storage.update_resume(id, data)?))
}
