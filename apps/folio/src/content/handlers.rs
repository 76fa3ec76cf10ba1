use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::content::{ContentKind, Document, DocumentSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<DocumentSummary>,
    pub tags: BTreeMap<String, usize>,
}

fn list(state: &AppState, kind: ContentKind, query: ListQuery) -> ListResponse {
    ListResponse {
        items: state.content.list(kind, query.tag.as_deref()),
        tags: state.content.tag_counts(kind),
    }
}

fn get(state: &AppState, kind: ContentKind, slug: &str) -> Result<Document, AppError> {
    state
        .content
        .get(kind, slug)?
        .ok_or_else(|| AppError::NotFound(format!("{} '{slug}' not found", kind.dir_name())))
}

/// GET /api/v1/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    Json(list(&state, ContentKind::Blog, query))
}

/// GET /api/v1/posts/:slug
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(get(&state, ContentKind::Blog, &slug)?))
}

/// GET /api/v1/studies
pub async fn handle_list_studies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    Json(list(&state, ContentKind::Study, query))
}

/// GET /api/v1/studies/:slug
pub async fn handle_get_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(get(&state, ContentKind::Study, &slug)?))
}
