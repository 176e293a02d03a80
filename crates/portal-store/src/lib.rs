//! In-memory registries behind typed repositories.
//!
//! This crate provides:
//! - A shared [`MemoryStore`] holding the user, OTP, and application
//!   registries behind a single write lock
//! - Typed repositories with atomic check-then-write semantics
//!
//! Duplicate detection happens under the write lock, so two concurrent
//! signups with the same email cannot both pass the existence check.

pub mod applications;
pub mod error;
pub mod memory;
pub mod otps;
pub mod users;

pub use applications::ApplicationRepository;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use otps::OtpRepository;
pub use users::UserRepository;
