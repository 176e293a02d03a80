//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "portal_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "portal_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "portal_http_requests_in_flight";

    // Account flow metrics
    pub const SIGNUPS_TOTAL: &str = "portal_signups_total";
    pub const VERIFICATIONS_TOTAL: &str = "portal_verifications_total";
    pub const LOGINS_TOTAL: &str = "portal_logins_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "portal_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a signup attempt.
pub fn record_signup(outcome: &'static str) {
    counter!(names::SIGNUPS_TOTAL, &[("outcome", outcome)]).increment(1);
}

/// Record an OTP verification attempt.
pub fn record_verification(outcome: &'static str) {
    counter!(names::VERIFICATIONS_TOTAL, &[("outcome", outcome)]).increment(1);
}

/// Record a login attempt.
pub fn record_login(outcome: &'static str) {
    counter!(names::LOGINS_TOTAL, &[("outcome", outcome)]).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", sanitize_path(endpoint))];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Collapse parameterized path segments so labels stay low-cardinality.
/// The route set is fixed, so prefix templates beat general regexes.
fn sanitize_path(path: &str) -> String {
    const TEMPLATES: [(&str, &str); 5] = [
        ("/verify-otp/", "/verify-otp/:email/:otp"),
        ("/resend-otp/", "/resend-otp/:email"),
        ("/jobs/application-status/", "/jobs/application-status/:email/:job_id"),
        ("/jobs/myApplications/", "/jobs/myApplications/:email"),
        (
            "/admin/applicationStatus/update/",
            "/admin/applicationStatus/update/:email/:job_id/:status",
        ),
    ];

    for (prefix, template) in TEMPLATES {
        if path.starts_with(prefix) {
            return template.to_string();
        }
    }
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(
            sanitize_path("/verify-otp/a@x.com/12345"),
            "/verify-otp/:email/:otp"
        );
        assert_eq!(
            sanitize_path("/jobs/myApplications/a@x.com"),
            "/jobs/myApplications/:email"
        );
        assert_eq!(sanitize_path("/jobs"), "/jobs");
        assert_eq!(sanitize_path("/signup"), "/signup");
    }
}
