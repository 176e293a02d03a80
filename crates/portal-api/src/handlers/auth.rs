//! Account handlers: signup, OTP verification, resend, login.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use portal_models::{LoginRequest, SignupRequest, UserProfile};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::{first_validation_message, MessageResponse};

/// Login response carries the activated profile alongside the envelope.
#[derive(Serialize)]
pub struct LoginResponse {
    pub status: bool,
    pub message: String,
    pub user: UserProfile,
}

/// POST /signup
///
/// Registers an inactive account and emails a one-time code. The
/// response never echoes back other accounts.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(first_validation_message(&e)))?;

    state.accounts.signup(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Account created, an OTP has been sent to your email",
        )),
    ))
}

/// GET /verify-otp/:email/:otp
pub async fn verify_otp(
    State(state): State<AppState>,
    Path((email, otp)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    state.accounts.verify_otp(&email, &otp).await?;

    Ok(Json(MessageResponse::new(
        "Account activated, you can now log in",
    )))
}

/// GET /resend-otp/:email
pub async fn resend_otp(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.accounts.resend_otp(&email).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "A new OTP has been sent to your email",
        )),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(first_validation_message(&e)))?;

    let user = state.accounts.login(&request).await?;

    Ok(Json(LoginResponse {
        status: true,
        message: "Login successful".to_string(),
        user,
    }))
}
