//! Axum HTTP API server for the job portal.
//!
//! This crate provides:
//! - Signup with email OTP verification and login
//! - Proxying of job listings and applications to the remote catalog
//! - Access-key gated admin endpoints
//! - Rate limiting, security headers, and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{AccountService, ApplicationService};
pub use state::AppState;
