//! Business logic services.

pub mod account;
pub mod application;

pub use account::AccountService;
pub use application::ApplicationService;
