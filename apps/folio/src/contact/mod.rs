// Contact form: validation, per-client rate limiting, and delivery through a
// pluggable notifier. Email transport lives behind `ContactNotifier`.

pub mod handlers;
pub mod notifier;
pub mod rate_limit;
pub mod validation;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use notifier::{ContactNotifier, LogNotifier};
pub use rate_limit::RateLimiter;
pub use validation::{validate_contact, FieldError};

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// A validated, trimmed submission ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub client: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub status: &'static str,
}
