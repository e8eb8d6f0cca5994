use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::context::actions::ZcvAction;
use crate::errors::AppError;
use crate::models::resume::GeneratedResume;
use crate::resumes::manager::{download_filename, duplicate, list_resumes, ResumeQuery};
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

async fn find(state: &AppState, id: &str) -> Result<GeneratedResume, AppError> {
    state
        .store
        .read(|s| s.resume(id).cloned())
        .await
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(query): Query<ResumeQuery>,
) -> Json<Vec<GeneratedResume>> {
    Json(state.store.read(|s| list_resumes(&s.resumes, &query)).await)
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeneratedResume>, AppError> {
    Ok(Json(find(&state, &id).await?))
}

/// POST /api/v1/resumes/:id/select
pub async fn handle_select_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeneratedResume>, AppError> {
    let selected = state
        .store
        .dispatch_with(ZcvAction::SelectResume(id.clone()), |s| {
            s.resume(&id).cloned()
        })
        .await?;
    selected.map(Json).ok_or_else(|| not_found(&id))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.dispatch(ZcvAction::DeleteResume(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/download
///
/// Serves the LaTeX source as an attachment and counts the download.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resume = state
        .store
        .dispatch_with(ZcvAction::RecordDownload(id.clone()), |s| s.resume(&id).cloned())
        .await?
        .ok_or_else(|| not_found(&id))?;

    let filename = download_filename(&resume);
    info!("Downloading resume {} as {filename}", resume.id);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        resume.latex,
    ))
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<GeneratedResume>), AppError> {
    let source = find(&state, &id).await?;
    let copy = duplicate(&source, Utc::now());
    state.store.dispatch(ZcvAction::AddResume(copy.clone())).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}
