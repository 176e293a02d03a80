//! User account models and password hashing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Account activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Inactive,
    Active,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }
}

/// Salted password hash with constant-time verification.
///
/// The salt keys an HMAC-SHA256 over the password; verification goes
/// through `Mac::verify_slice`, which compares in constant time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash {
    /// Base64-encoded salt.
    pub salt: String,
    /// Base64-encoded HMAC-SHA256 digest.
    pub hash: String,
}

impl PasswordHash {
    /// Hash a password with a fresh random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);

        let digest = digest_with_salt(&salt, password);

        Self {
            salt: BASE64.encode(salt),
            hash: BASE64.encode(digest),
        }
    }

    /// Verify a password attempt against the stored hash.
    ///
    /// Recomputes the digest with the stored salt and compares in
    /// constant time. Corrupt stored material verifies as false rather
    /// than erroring.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = BASE64.decode(&self.salt) else {
            return false;
        };
        let Ok(expected) = BASE64.decode(&self.hash) else {
            return false;
        };

        let mut mac = new_mac(&salt);
        mac.update(password.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

fn new_mac(salt: &[u8]) -> HmacSha256 {
    // SAFETY: HMAC accepts keys of any length; this cannot fail.
    HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length")
}

fn digest_with_salt(salt: &[u8], password: &str) -> Vec<u8> {
    let mut mac = new_mac(salt);
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    /// Unique across the registry.
    pub email: String,
    /// Unique across the registry.
    pub phone: String,
    pub password: PasswordHash,
    pub status: AccountStatus,
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Create a new inactive user with a hashed password.
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
            phone: phone.into(),
            password: PasswordHash::new(password),
            status: AccountStatus::Inactive,
            registered_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Public projection without password material.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status,
            registered_at: self.registered_at,
        }
    }
}

/// Outward-facing user representation. Never carries password material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub status: AccountStatus,
    pub registered_at: DateTime<Utc>,
}
