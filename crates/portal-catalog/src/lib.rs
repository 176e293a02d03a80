//! Client for the remote job catalog service.
//!
//! The portal does not own job listings; it forwards paging and filter
//! parameters to the catalog and relays its responses. This crate wraps
//! that HTTP surface behind a typed client with timeout and retry.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use error::{CatalogError, CatalogResult};
pub use types::{JobListing, JobQuery};
