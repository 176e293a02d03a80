//! Request handlers.

use serde::Serialize;
use validator::ValidationErrors;

pub mod admin;
pub mod auth;
pub mod health;
pub mod jobs;

pub use admin::*;
pub use auth::*;
pub use health::*;
pub use jobs::*;

/// Success envelope: boolean status flag plus a message.
#[derive(Serialize)]
pub struct MessageResponse {
    pub status: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }
}

/// First field-level message out of a validation failure, mirroring the
/// one-message-at-a-time contract of the signup endpoint.
pub(crate) fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
