//! Application service: job listings proxy and application lifecycle.

use std::sync::Arc;

use tracing::info;

use portal_catalog::{CatalogClient, JobListing, JobQuery};
use portal_models::{ApplicationStatus, ApplyRequest, JobApplication, Qualification};
use portal_store::ApplicationRepository;

use crate::error::{ApiError, ApiResult};

/// Orchestrates applications over the catalog and the local registry.
#[derive(Clone)]
pub struct ApplicationService {
    applications: ApplicationRepository,
    catalog: Arc<CatalogClient>,
}

impl ApplicationService {
    /// Create a new application service.
    pub fn new(applications: ApplicationRepository, catalog: Arc<CatalogClient>) -> Self {
        Self { applications, catalog }
    }

    /// Job listings relayed from the catalog, filters passed through.
    pub async fn listings(&self, query: &JobQuery) -> ApiResult<Vec<JobListing>> {
        Ok(self.catalog.list_jobs(query).await?)
    }

    /// Deduplicated catalog categories.
    pub async fn categories(&self) -> ApiResult<Vec<String>> {
        Ok(self.catalog.categories().await?)
    }

    /// Submit an application after cross-checking the job id upstream.
    pub async fn apply(&self, request: &ApplyRequest) -> ApiResult<JobApplication> {
        let qualification: Qualification = request
            .qualification
            .parse()
            .map_err(ApiError::Validation)?;

        if self.catalog.find_job(&request.job_id).await?.is_none() {
            return Err(ApiError::validation(format!(
                "Job '{}' does not exist in the catalog",
                request.job_id
            )));
        }

        let application = JobApplication::new(
            &request.firstname,
            &request.lastname,
            &request.email,
            &request.job_id,
            qualification,
        );
        let recorded = application.clone();

        // Duplicate applicant/job pairs surface as 409 via StoreError.
        self.applications.create(application).await?;

        info!(email = %request.email, job_id = %request.job_id, "Application submitted");
        Ok(recorded)
    }

    /// One applicant's application for one job.
    pub async fn status(&self, email: &str, job_id: &str) -> ApiResult<JobApplication> {
        self.applications
            .find(email, job_id)
            .await
            .ok_or_else(|| {
                ApiError::not_found(format!("No application by {email} for job '{job_id}'"))
            })
    }

    /// All applications submitted by an email.
    pub async fn list_for(&self, email: &str) -> Vec<JobApplication> {
        self.applications.list_for_email(email).await
    }

    /// Admin path: move an application to a status in the closed set.
    pub async fn update_status(
        &self,
        email: &str,
        job_id: &str,
        submitted_status: &str,
    ) -> ApiResult<JobApplication> {
        let status: ApplicationStatus = submitted_status
            .parse()
            .map_err(ApiError::Validation)?;

        let updated = self
            .applications
            .update_status(email, job_id, status)
            .await?;

        info!(email = %email, job_id = %job_id, status = %status.as_str(), "Application status updated");
        Ok(updated)
    }
}
