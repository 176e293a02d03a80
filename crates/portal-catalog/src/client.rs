//! Job catalog HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::types::{JobListing, JobQuery};

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries
    pub max_retries: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }
}

impl CatalogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("CATALOG_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            max_retries: std::env::var("CATALOG_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }
}

/// Client for the remote job catalog.
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        Self::new(CatalogConfig::from_env())
    }

    /// List jobs, forwarding the query parameters untouched.
    pub async fn list_jobs(&self, query: &JobQuery) -> CatalogResult<Vec<JobListing>> {
        let url = format!("{}/jobs", self.config.base_url);

        debug!(?query, "Fetching job listings from catalog");

        let response = self
            .with_retry(|| async {
                let response = self
                    .http
                    .get(&url)
                    .query(&query.to_params())
                    .send()
                    .await
                    .map_err(CatalogError::Network)?;
                check_status(response).await
            })
            .await?;

        let listings: Vec<JobListing> = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(listings)
    }

    /// Distinct listing categories, in first-seen order.
    pub async fn categories(&self) -> CatalogResult<Vec<String>> {
        let listings = self.list_jobs(&JobQuery::default()).await?;

        let mut seen = std::collections::HashSet::new();
        let mut categories = Vec::new();
        for listing in listings {
            if seen.insert(listing.category.clone()) {
                categories.push(listing.category);
            }
        }
        Ok(categories)
    }

    /// Fetch one listing by id. `None` when the catalog has no such job.
    pub async fn find_job(&self, job_id: &str) -> CatalogResult<Option<JobListing>> {
        let url = format!("{}/jobs/{}", self.config.base_url, job_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::Network)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response).await?;
        let listing: JobListing = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(Some(listing))
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> CatalogResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = CatalogResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(250 * 2u64.pow(attempt));
                    warn!(
                        "Catalog request failed (attempt {}), retrying in {:?}: {}",
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

        Err(last_error.unwrap_or(CatalogError::InvalidResponse("unreachable".to_string())))
    }
}

async fn check_status(response: reqwest::Response) -> CatalogResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::RequestFailed { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> CatalogClient {
        CatalogClient::new(CatalogConfig {
            base_url,
            timeout: Duration::from_secs(2),
            max_retries: 1,
        })
        .unwrap()
    }

    fn listing(id: &str, category: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Backend Engineer",
            "company": "Acme",
            "category": category,
        })
    }

    #[tokio::test]
    async fn test_list_jobs_forwards_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("length", "5"))
            .and(query_param("category", "engineering"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([listing("j1", "engineering")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let jobs = client
            .list_jobs(&JobQuery {
                length: Some(5),
                category: Some("engineering".to_string()),
                company: None,
            })
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "j1");
    }

    #[tokio::test]
    async fn test_categories_deduplicate_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                listing("j1", "engineering"),
                listing("j2", "design"),
                listing("j3", "engineering"),
            ])))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let categories = client.categories().await.unwrap();
        assert_eq!(categories, vec!["engineering", "design"]);
    }

    #[tokio::test]
    async fn test_find_job_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/j1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing("j1", "engineering")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.find_job("j1").await.unwrap().is_some());
        assert!(client.find_job("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_errors_retry_then_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2) // initial attempt + one retry
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.list_jobs(&JobQuery::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::RequestFailed { status: 503, .. }));
    }
}
