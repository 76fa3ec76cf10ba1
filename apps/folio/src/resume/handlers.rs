use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::resume::{ExperienceRecord, ResumeDocument};
use crate::resume::{build_resume, ResumeError};
use crate::state::AppState;

/// Re-reads and re-parses the résumé; nothing is cached between requests.
async fn load_resume(state: &AppState) -> Result<ResumeDocument, AppError> {
    let text = tokio::fs::read_to_string(&state.config.resume_path)
        .await
        .map_err(ResumeError::Io)?;
    Ok(build_resume(&text, &state.config.profile)?)
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    Ok(Json(load_resume(&state).await?))
}

/// GET /api/v1/resume/experience
pub async fn handle_get_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExperienceRecord>>, AppError> {
    Ok(Json(load_resume(&state).await?.experiences))
}
