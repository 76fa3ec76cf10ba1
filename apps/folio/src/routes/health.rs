use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Blog posts and case studies held in memory, drafts included.
    pub documents: usize,
    pub resume_readable: bool,
}

/// GET /health
/// Reports the loaded content count and whether the résumé file can be read.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let resume_readable = tokio::fs::metadata(&state.config.resume_path)
        .await
        .is_ok_and(|m| m.is_file());
    Json(HealthStatus {
        status: if resume_readable { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        documents: state.content.len(),
        resume_readable,
    })
}
