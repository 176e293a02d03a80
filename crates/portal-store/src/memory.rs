//! Shared in-memory store.

use std::sync::Arc;

use tokio::sync::RwLock;

use portal_models::{JobApplication, OtpRecord, User};

/// The three ordered registries, guarded together by one lock so a
/// repository can check and write in a single critical section.
#[derive(Debug, Default)]
pub(crate) struct Registries {
    pub users: Vec<User>,
    pub otps: Vec<OtpRecord>,
    pub applications: Vec<JobApplication>,
}

/// Cloneable handle to the in-memory registries.
///
/// Reads take the shared lock; every mutation takes the exclusive lock
/// for the full check-then-write sequence.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub(crate) inner: Arc<RwLock<Registries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
