//! Shared data models for the job portal backend.
//!
//! This crate provides Serde-serializable types for:
//! - User accounts and password hashing
//! - One-time verification codes
//! - Job applications
//! - Request payloads with validation rules

pub mod application;
pub mod otp;
pub mod requests;
pub mod user;

// Re-export common types
pub use application::{ApplicationStatus, JobApplication, Qualification};
pub use otp::{OtpRecord, OTP_VALIDITY_MINUTES};
pub use requests::{ApplyRequest, LoginRequest, SignupRequest};
pub use user::{AccountStatus, PasswordHash, User, UserProfile};
