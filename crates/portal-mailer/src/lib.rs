//! Transactional email client.
//!
//! Sends plain-text mail through a SendGrid-compatible HTTP API. Sends
//! can run on a spawned task whose outcome stays observable through the
//! returned join handle, a tracing event, and a counter. Failures are
//! recorded, never silently swallowed.

pub mod client;
pub mod error;

pub use client::{EmailMessage, Mailer, MailerConfig};
pub use error::{MailerError, MailerResult};
