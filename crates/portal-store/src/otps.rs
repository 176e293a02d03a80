//! Typed repository for one-time codes.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use portal_models::OtpRecord;

use crate::memory::MemoryStore;

/// Repository for the OTP registry.
///
/// Multiple unexpired codes may coexist for the same email; issuing a
/// new code never invalidates earlier ones.
#[derive(Clone)]
pub struct OtpRepository {
    store: MemoryStore,
}

impl OtpRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Record a freshly issued code.
    pub async fn create(&self, record: OtpRecord) {
        let mut registries = self.store.inner.write().await;
        debug!(email = %record.email, "Issued OTP");
        registries.otps.push(record);
    }

    /// Find a record matching both email and code exactly.
    pub async fn find_match(&self, email: &str, code: u32) -> Option<OtpRecord> {
        let registries = self.store.inner.read().await;
        registries
            .otps
            .iter()
            .find(|o| o.email == email && o.code == code)
            .cloned()
    }

    /// All codes issued for an email, oldest first.
    pub async fn list_for_email(&self, email: &str) -> Vec<OtpRecord> {
        let registries = self.store.inner.read().await;
        registries
            .otps
            .iter()
            .filter(|o| o.email == email)
            .cloned()
            .collect()
    }

    /// Delete a consumed code. Returns whether a record was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut registries = self.store.inner.write().await;
        let before = registries.otps.len();
        registries.otps.retain(|o| o.id != id);
        registries.otps.len() < before
    }

    /// Drop expired codes for an email. Returns the number removed.
    pub async fn purge_expired(&self, email: &str, now: DateTime<Utc>) -> usize {
        let mut registries = self.store.inner.write().await;
        let before = registries.otps.len();
        registries
            .otps
            .retain(|o| o.email != email || !o.is_expired(now));
        before - registries.otps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_find_match_requires_both_fields() {
        let repo = OtpRepository::new(MemoryStore::new());
        let otp = OtpRecord::issue("a@x.com");
        let code = otp.code;
        repo.create(otp).await;

        assert!(repo.find_match("a@x.com", code).await.is_some());
        assert!(repo.find_match("b@x.com", code).await.is_none());
        let other_code = if code == 10_000 { 10_001 } else { code - 1 };
        assert!(repo.find_match("a@x.com", other_code).await.is_none());
    }

    #[tokio::test]
    async fn test_multiple_codes_coexist() {
        let repo = OtpRepository::new(MemoryStore::new());
        repo.create(OtpRecord::issue("a@x.com")).await;
        repo.create(OtpRecord::issue("a@x.com")).await;

        assert_eq!(repo.list_for_email("a@x.com").await.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_consumed_code() {
        let repo = OtpRepository::new(MemoryStore::new());
        let otp = OtpRecord::issue("a@x.com");
        let id = otp.id;
        let code = otp.code;
        repo.create(otp).await;

        assert!(repo.remove(id).await);
        assert!(!repo.remove(id).await);
        assert!(repo.find_match("a@x.com", code).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_leaves_valid_and_other_emails() {
        let repo = OtpRepository::new(MemoryStore::new());

        let mut stale = OtpRecord::issue("a@x.com");
        stale.issued_at = Utc::now() - Duration::minutes(30);
        repo.create(stale).await;
        repo.create(OtpRecord::issue("a@x.com")).await;

        let mut other = OtpRecord::issue("b@x.com");
        other.issued_at = Utc::now() - Duration::minutes(30);
        repo.create(other).await;

        let removed = repo.purge_expired("a@x.com", Utc::now()).await;
        assert_eq!(removed, 1);
        assert_eq!(repo.list_for_email("a@x.com").await.len(), 1);
        assert_eq!(repo.list_for_email("b@x.com").await.len(), 1);
    }
}
