//! Application state.

use std::sync::Arc;

use portal_catalog::CatalogClient;
use portal_mailer::Mailer;
use portal_store::{ApplicationRepository, MemoryStore, OtpRepository, UserRepository};

use crate::config::ApiConfig;
use crate::services::{AccountService, ApplicationService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub accounts: AccountService,
    pub applications: ApplicationService,
    pub users: UserRepository,
    pub otps: OtpRepository,
}

impl AppState {
    /// Create application state with environment-configured clients.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let mailer = Arc::new(Mailer::from_env()?);
        let catalog = Arc::new(CatalogClient::from_env()?);
        Ok(Self::with_components(config, MemoryStore::new(), mailer, catalog))
    }

    /// Create application state from explicit components.
    ///
    /// Tests use this to point the mailer and catalog at mock servers.
    pub fn with_components(
        config: ApiConfig,
        store: MemoryStore,
        mailer: Arc<Mailer>,
        catalog: Arc<CatalogClient>,
    ) -> Self {
        let users = UserRepository::new(store.clone());
        let otps = OtpRepository::new(store.clone());
        let application_repo = ApplicationRepository::new(store);

        let accounts = AccountService::new(users.clone(), otps.clone(), mailer);
        let applications = ApplicationService::new(application_repo, catalog);

        Self {
            config,
            accounts,
            applications,
            users,
            otps,
        }
    }
}
