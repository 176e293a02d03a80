//! API routes.

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::admin::{list_customers, update_application_status};
use crate::handlers::auth::{login, resend_otp, signup, verify_otp};
use crate::handlers::health::{health, welcome};
use crate::handlers::jobs::{
    application_status, apply, categories, list_jobs, my_applications,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // Account lifecycle routes (open)
    let account_routes = Router::new()
        .route("/signup", post(signup))
        .route("/verify-otp/:email/:otp", get(verify_otp))
        .route("/resend-otp/:email", get(resend_otp))
        .route("/login", post(login));

    // Job routes (access-key gated by the ApiKey extractor)
    let job_routes = Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/categories", get(categories))
        .route("/jobs/apply", post(apply))
        .route("/jobs/application-status/:email/:job_id", get(application_status))
        .route("/jobs/myApplications/:email", get(my_applications));

    // Admin routes (access-key gated)
    let admin_routes = Router::new()
        .route(
            "/admin/applicationStatus/update/:email/:job_id/:status",
            put(update_application_status),
        )
        .route("/admin/customers", get(list_customers))
        .route("/customer", get(list_customers));

    let rate_limiter = std::sync::Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(account_routes)
        .merge(job_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/healthz", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Request body size limit
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
