//! Mailer error types.

use thiserror::Error;

pub type MailerResult<T> = Result<T, MailerError>;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Send rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MailerError {
    pub fn is_retryable(&self) -> bool {
        match self {
            MailerError::Network(_) => true,
            MailerError::Rejected { status, .. } => *status >= 500,
            MailerError::MissingConfig(_) => false,
        }
    }
}
