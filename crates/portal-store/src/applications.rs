//! Typed repository for job applications.

use chrono::Utc;
use metrics::counter;
use tracing::info;

use portal_models::{ApplicationStatus, JobApplication};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;

/// Repository for the application registry.
#[derive(Clone)]
pub struct ApplicationRepository {
    store: MemoryStore,
}

impl ApplicationRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Record an application if the applicant has not already applied
    /// for the same job. Check and insert share one write lock.
    pub async fn create(&self, application: JobApplication) -> StoreResult<()> {
        let mut registries = self.store.inner.write().await;

        let duplicate = registries
            .applications
            .iter()
            .any(|a| a.email == application.email && a.job_id == application.job_id);
        if duplicate {
            return Err(StoreError::Duplicate("application"));
        }

        info!(email = %application.email, job_id = %application.job_id, "Recorded application");
        counter!("portal_applications_created_total").increment(1);
        registries.applications.push(application);
        Ok(())
    }

    /// Look up one applicant's application for one job.
    pub async fn find(&self, email: &str, job_id: &str) -> Option<JobApplication> {
        let registries = self.store.inner.read().await;
        registries
            .applications
            .iter()
            .find(|a| a.email == email && a.job_id == job_id)
            .cloned()
    }

    /// All applications submitted by an email, oldest first.
    pub async fn list_for_email(&self, email: &str) -> Vec<JobApplication> {
        let registries = self.store.inner.read().await;
        registries
            .applications
            .iter()
            .filter(|a| a.email == email)
            .cloned()
            .collect()
    }

    /// Update the status of an existing application.
    pub async fn update_status(
        &self,
        email: &str,
        job_id: &str,
        status: ApplicationStatus,
    ) -> StoreResult<JobApplication> {
        let mut registries = self.store.inner.write().await;
        let application = registries
            .applications
            .iter_mut()
            .find(|a| a.email == email && a.job_id == job_id)
            .ok_or(StoreError::NotFound("application"))?;

        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_models::Qualification;

    fn application(email: &str, job_id: &str) -> JobApplication {
        JobApplication::new("Ada", "Obi", email, job_id, Qualification::Bsc)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = ApplicationRepository::new(MemoryStore::new());
        repo.create(application("a@x.com", "job-1")).await.unwrap();

        assert!(repo.find("a@x.com", "job-1").await.is_some());
        assert!(repo.find("a@x.com", "job-2").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected() {
        let repo = ApplicationRepository::new(MemoryStore::new());
        repo.create(application("a@x.com", "job-1")).await.unwrap();

        let err = repo.create(application("a@x.com", "job-1")).await.unwrap_err();
        assert!(err.is_duplicate());

        // Same applicant, different job is fine.
        repo.create(application("a@x.com", "job-2")).await.unwrap();
        assert_eq!(repo.list_for_email("a@x.com").await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = ApplicationRepository::new(MemoryStore::new());
        repo.create(application("a@x.com", "job-1")).await.unwrap();

        let updated = repo
            .update_status("a@x.com", "job-1", ApplicationStatus::Shortlisted)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Shortlisted);
        assert!(updated.updated_at >= updated.applied_at);

        assert!(repo
            .update_status("a@x.com", "job-9", ApplicationStatus::Hired)
            .await
            .is_err());
    }
}
