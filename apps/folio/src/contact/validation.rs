use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::contact::{ContactMessage, ContactRequest};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("static regex must compile")
});

const MAX_NAME_CHARS: usize = 100;
const MAX_SUBJECT_CHARS: usize = 200;
const MIN_MESSAGE_CHARS: usize = 10;
const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

fn field_error(field: &'static str, reason: impl Into<String>) -> FieldError {
    FieldError {
        field,
        reason: reason.into(),
    }
}

/// Checks every field and returns all failures at once.
pub fn validate_contact(req: &ContactRequest, client: &str) -> Result<ContactMessage, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = req.name.trim();
    if name.is_empty() {
        errors.push(field_error("name", "Name is required"));
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push(field_error("name", format!("Name must be at most {MAX_NAME_CHARS} characters")));
    }

    let email = req.email.trim();
    if !EMAIL_RE.is_match(email) {
        errors.push(field_error("email", "A valid email address is required"));
    }

    let subject = req
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if subject.is_some_and(|s| s.chars().count() > MAX_SUBJECT_CHARS) {
        errors.push(field_error(
            "subject",
            format!("Subject must be at most {MAX_SUBJECT_CHARS} characters"),
        ));
    }

    let message = req.message.trim();
    let len = message.chars().count();
    if len < MIN_MESSAGE_CHARS {
        errors.push(field_error(
            "message",
            format!("Message must be at least {MIN_MESSAGE_CHARS} characters"),
        ));
    } else if len > MAX_MESSAGE_CHARS {
        errors.push(field_error(
            "message",
            format!("Message must be at most {MAX_MESSAGE_CHARS} characters"),
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactMessage {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.map(String::from),
        message: message.to_string(),
        client: client.to_string(),
    })
}
