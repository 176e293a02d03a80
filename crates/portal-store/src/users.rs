//! Typed repository for user records.

use metrics::counter;
use tracing::info;

use portal_models::{AccountStatus, User};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;

/// Repository for the user registry.
#[derive(Clone)]
pub struct UserRepository {
    store: MemoryStore,
}

impl UserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Insert a user if no record with the same email or phone exists.
    ///
    /// The existence check and the insert run under one write lock, so
    /// concurrent signups cannot both pass the check.
    pub async fn create(&self, user: User) -> StoreResult<()> {
        let mut registries = self.store.inner.write().await;

        let taken = registries
            .users
            .iter()
            .any(|u| u.email == user.email || u.phone == user.phone);
        if taken {
            return Err(StoreError::Duplicate("account"));
        }

        info!(email = %user.email, "Created user record");
        counter!("portal_users_created_total").increment(1);
        registries.users.push(user);
        Ok(())
    }

    /// Find a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let registries = self.store.inner.read().await;
        registries.users.iter().find(|u| u.email == email).cloned()
    }

    /// Find a user whose email or phone matches the identifier.
    pub async fn find_by_email_or_phone(&self, identifier: &str) -> Option<User> {
        let registries = self.store.inner.read().await;
        registries
            .users
            .iter()
            .find(|u| u.email == identifier || u.phone == identifier)
            .cloned()
    }

    /// Flip a user's status to active.
    pub async fn activate(&self, email: &str) -> StoreResult<User> {
        let mut registries = self.store.inner.write().await;
        let user = registries
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(StoreError::NotFound("account"))?;

        user.status = AccountStatus::Active;
        Ok(user.clone())
    }

    /// All users, in registration order.
    pub async fn list(&self) -> Vec<User> {
        let registries = self.store.inner.read().await;
        registries.users.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, phone: &str) -> User {
        User::new("Ada", "Obi", email, phone, "pw")
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = UserRepository::new(MemoryStore::new());
        repo.create(user("a@x.com", "0801")).await.unwrap();

        assert!(repo.find_by_email("a@x.com").await.is_some());
        assert!(repo.find_by_email_or_phone("0801").await.is_some());
        assert!(repo.find_by_email("b@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = UserRepository::new(MemoryStore::new());
        repo.create(user("a@x.com", "0801")).await.unwrap();

        let err = repo.create(user("a@x.com", "0802")).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let repo = UserRepository::new(MemoryStore::new());
        repo.create(user("a@x.com", "0801")).await.unwrap();

        let err = repo.create(user("b@x.com", "0801")).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_signups_race() {
        // Both tasks race to insert the same email; exactly one wins.
        let repo = UserRepository::new(MemoryStore::new());

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(user("a@x.com", "0801")).await })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(user("a@x.com", "0802")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_activate() {
        let repo = UserRepository::new(MemoryStore::new());
        repo.create(user("a@x.com", "0801")).await.unwrap();

        let activated = repo.activate("a@x.com").await.unwrap();
        assert_eq!(activated.status, AccountStatus::Active);
        assert!(repo.activate("missing@x.com").await.is_err());
    }
}
