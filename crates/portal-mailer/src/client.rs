//! SendGrid-compatible mail client.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use reqwest::Client;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{MailerError, MailerResult};

/// Configuration for the mail client.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Base URL of the mail provider API
    pub base_url: String,
    /// Provider API key
    pub api_key: String,
    /// Sender address for all outbound mail
    pub sender: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries
    pub max_retries: u32,
}

impl MailerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> MailerResult<Self> {
        Ok(Self {
            base_url: std::env::var("SENDGRID_BASE_URL")
                .unwrap_or_else(|_| "https://api.sendgrid.com".to_string()),
            api_key: std::env::var("SENDGRID_API_KEY")
                .map_err(|_| MailerError::MissingConfig("SENDGRID_API_KEY"))?,
            sender: std::env::var("SENDER_EMAIL")
                .map_err(|_| MailerError::MissingConfig("SENDER_EMAIL"))?,
            timeout: Duration::from_secs(
                std::env::var("MAILER_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            max_retries: std::env::var("MAILER_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }
}

/// A plain-text message to one recipient.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// SendGrid v3 `/mail/send` payload.
#[derive(Serialize)]
struct SendPayload<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

/// Mail client for a SendGrid-compatible provider.
pub struct Mailer {
    http: Client,
    config: MailerConfig,
}

impl Mailer {
    /// Create a new mail client.
    pub fn new(config: MailerConfig) -> MailerResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MailerError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> MailerResult<Self> {
        Self::new(MailerConfig::from_env()?)
    }

    /// Send a message, retrying retryable failures with backoff.
    pub async fn send(&self, message: &EmailMessage) -> MailerResult<()> {
        let url = format!("{}/v3/mail/send", self.config.base_url);

        debug!(to = %message.to, subject = %message.subject, "Sending email");

        let payload = SendPayload {
            personalizations: [Personalization {
                to: [Address { email: &message.to }],
            }],
            from: Address {
                email: &self.config.sender,
            },
            subject: &message.subject,
            content: [Content {
                content_type: "text/plain",
                value: &message.body,
            }],
        };

        self.with_retry(|| async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&payload)
                .send()
                .await
                .map_err(MailerError::Network)?;

            if response.status().is_success() {
                Ok(())
            } else {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(MailerError::Rejected { status, body })
            }
        })
        .await
    }

    /// Send on a background task.
    ///
    /// The originating request never waits on (or fails because of) the
    /// send; the outcome stays observable through the returned handle,
    /// the log line, and the `portal_emails_total` counter.
    pub fn spawn_send(self: Arc<Self>, message: EmailMessage) -> JoinHandle<MailerResult<()>> {
        tokio::spawn(async move {
            let result = self.send(&message).await;
            match &result {
                Ok(()) => {
                    info!(to = %message.to, subject = %message.subject, "Email sent");
                    counter!("portal_emails_total", &[("outcome", "sent")]).increment(1);
                }
                Err(e) => {
                    warn!(to = %message.to, subject = %message.subject, error = %e, "Email send failed");
                    counter!("portal_emails_total", &[("outcome", "failed")]).increment(1);
                }
            }
            result
        })
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> MailerResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = MailerResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(250 * 2u64.pow(attempt));
                    warn!(
                        "Email send failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(MailerError::MissingConfig("mailer")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> MailerConfig {
        MailerConfig {
            base_url,
            api_key: "SG.test".to_string(),
            sender: "noreply@jobportal.test".to_string(),
            timeout: Duration::from_secs(2),
            max_retries: 1,
        }
    }

    #[tokio::test]
    async fn test_send_posts_sendgrid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .and(body_partial_json(serde_json::json!({
                "from": {"email": "noreply@jobportal.test"},
                "subject": "OTP confirmation",
                "personalizations": [{"to": [{"email": "ada@example.com"}]}],
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = Mailer::new(test_config(server.uri())).unwrap();
        let message = EmailMessage::new("ada@example.com", "OTP confirmation", "code 12345");
        mailer.send(&message).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2) // initial attempt + one retry
            .mount(&server)
            .await;

        let mailer = Mailer::new(test_config(server.uri())).unwrap();
        let message = EmailMessage::new("ada@example.com", "subject", "body");
        let err = mailer.send(&message).await.unwrap_err();
        assert!(matches!(err, MailerError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = Mailer::new(test_config(server.uri())).unwrap();
        let message = EmailMessage::new("ada@example.com", "subject", "body");
        let err = mailer.send(&message).await.unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_spawn_send_surfaces_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let mailer = Arc::new(Mailer::new(test_config(server.uri())).unwrap());
        let handle = mailer.spawn_send(EmailMessage::new("a@x.com", "s", "b"));
        assert!(handle.await.unwrap().is_ok());
    }
}
