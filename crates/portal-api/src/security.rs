//! Access-key gating for protected endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the access key.
const API_KEY_HEADER: &str = "apikey";

/// Extractor proving the request carried the configured access key.
///
/// Handlers take this as an argument to gate themselves; extraction
/// fails with 401 when the header is missing or does not match.
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

#[axum::async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        if !key_matches(presented, &state.config.api_key) {
            return Err(ApiError::Unauthorized);
        }

        Ok(Self)
    }
}

/// A configured-but-empty key locks the gated endpoints rather than
/// leaving them open.
fn key_matches(presented: &str, configured: &str) -> bool {
    !configured.is_empty() && presented == configured
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches() {
        assert!(key_matches("secret", "secret"));
        assert!(!key_matches("wrong", "secret"));
        assert!(!key_matches("", "secret"));
    }

    #[test]
    fn test_empty_configured_key_denies_all() {
        assert!(!key_matches("", ""));
        assert!(!key_matches("anything", ""));
    }
}
