//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use portal_catalog::CatalogError;
use portal_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Account already exist")]
    DuplicateAccount,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("OTP has expired")]
    CodeExpired,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Account is pending OTP verification")]
    AccountPending,

    #[error("Unauthorised")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Job catalog error: {0}")]
    Upstream(#[from] CatalogError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateAccount
            | ApiError::InvalidCode
            | ApiError::CodeExpired
            | ApiError::AccountNotFound
            | ApiError::InvalidCredentials
            | ApiError::AccountPending => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) | ApiError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error envelope: boolean status flag plus a message.
#[derive(Serialize)]
struct ErrorResponse {
    status: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let message = match &self {
            ApiError::Internal(_) | ApiError::Upstream(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    match &self {
                        ApiError::Upstream(_) => "Job catalog is unavailable".to_string(),
                        _ => "An internal error occurred".to_string(),
                    }
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            status: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::DuplicateAccount.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Store(StoreError::Duplicate("application")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Store(StoreError::NotFound("application")).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_messages_match_interface() {
        assert_eq!(ApiError::DuplicateAccount.to_string(), "Account already exist");
        assert_eq!(ApiError::InvalidCode.to_string(), "Invalid OTP");
        assert_eq!(ApiError::CodeExpired.to_string(), "OTP has expired");
    }
}
