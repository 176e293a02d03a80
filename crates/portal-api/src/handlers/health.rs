//! Welcome and health check handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

use super::MessageResponse;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Landing page greeting.
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Welcome to our Job portal, we hope you enjoy your stay here.",
    ))
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
