//! Catalog client error types.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Network(_) => true,
            CatalogError::RequestFailed { status, .. } => *status >= 500,
            CatalogError::InvalidResponse(_) => false,
        }
    }
}
