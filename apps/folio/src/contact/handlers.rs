use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, warn};

use crate::contact::rate_limit::RateDecision;
use crate::contact::{validate_contact, ContactReceipt, ContactRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// First `x-forwarded-for` hop, then `x-real-ip`, else a shared bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };
    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// POST /api/v1/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactReceipt>), AppError> {
    let client = client_key(&headers);

    match state.rate_limiter.check(&client) {
        RateDecision::Limited { retry_after } => {
            warn!("Contact rate limit hit for {client}");
            return Err(AppError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }
        RateDecision::Allowed { remaining } => debug!(
            "Contact request from {client}, {remaining} left in window, {} clients tracked",
            state.rate_limiter.tracked_clients()
        ),
    }

    let message = validate_contact(&req, &client).map_err(AppError::InvalidFields)?;
    state
        .notifier
        .deliver(&message)
        .await
        .map_err(|e| AppError::Delivery(format!("{e:#}")))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactReceipt {
            id: message.id,
            status: "received",
        }),
    ))
}
