use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::contact::FieldError;
use crate::content::ContentError;
use crate::resume::ResumeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid fields: {0:?}")]
    InvalidFields(Vec<FieldError>),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Résumé error: {0}")]
    Resume(#[from] ResumeError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<Value> = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidFields(fields) => {
                details = Some(json!(fields));
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "One or more fields are invalid".to_string(),
                )
            }
            AppError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("Too many requests, try again in {retry_after_secs} seconds"),
            ),
            AppError::Resume(e) => {
                tracing::error!("Résumé error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RESUME_ERROR",
                    "The résumé could not be read".to_string(),
                )
            }
            AppError::Content(e) => {
                tracing::error!("Content error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONTENT_ERROR",
                    "The document could not be read".to_string(),
                )
            }
            AppError::Delivery(msg) => {
                tracing::error!("Delivery error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_ERROR",
                    "The message could not be delivered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        let mut response = (status, Json(json!({ "error": error }))).into_response();
        if let AppError::RateLimited { retry_after_secs } = self {
            if let Ok(v) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, v);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = AppError::RateLimited { retry_after_secs: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
    }

    #[test]
    fn test_missing_section_maps_to_500() {
        let err: AppError = ResumeError::MissingSection("Professional Experience".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("post 'x'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
