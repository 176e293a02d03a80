//! One-time verification codes.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Codes are valid for this many minutes after issuance.
pub const OTP_VALIDITY_MINUTES: i64 = 5;

/// Inclusive 5-digit code range.
const CODE_MIN: u32 = 10_000;
const CODE_MAX: u32 = 99_999;

/// A one-time code tied to an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub id: Uuid,
    pub code: u32,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Issue a fresh 5-digit code for an email address.
    pub fn issue(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: generate_code(),
            email: email.into(),
            issued_at: Utc::now(),
        }
    }

    /// Whether the code has outlived its validity window at `now`.
    ///
    /// Elapsed time is converted to minutes rounded up; the code expires
    /// once that exceeds [`OTP_VALIDITY_MINUTES`]. An elapsed time of
    /// exactly five minutes is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let elapsed_ms = (now - self.issued_at).num_milliseconds().max(0);
        let elapsed_minutes = (elapsed_ms + 59_999) / 60_000;
        elapsed_minutes > OTP_VALIDITY_MINUTES
    }
}

/// Generate a random code in the 5-digit range.
pub fn generate_code() -> u32 {
    rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_code_is_five_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!((CODE_MIN..=CODE_MAX).contains(&code), "code {code} out of range");
        }
    }

    #[test]
    fn test_fresh_code_is_valid() {
        let otp = OtpRecord::issue("a@x.com");
        assert!(!otp.is_expired(Utc::now()));
    }

    #[test]
    fn test_exactly_five_minutes_is_valid() {
        let otp = OtpRecord::issue("a@x.com");
        let now = otp.issued_at + Duration::minutes(5);
        assert!(!otp.is_expired(now));
    }

    #[test]
    fn test_partial_sixth_minute_expires() {
        // 5m01s rounds up to 6 minutes, past the window.
        let otp = OtpRecord::issue("a@x.com");
        let now = otp.issued_at + Duration::minutes(5) + Duration::seconds(1);
        assert!(otp.is_expired(now));
    }

    #[test]
    fn test_just_under_five_minutes_is_valid() {
        let otp = OtpRecord::issue("a@x.com");
        let now = otp.issued_at + Duration::minutes(4) + Duration::seconds(59);
        assert!(!otp.is_expired(now));
    }

    #[test]
    fn test_clock_skew_does_not_expire() {
        // A code "issued in the future" must not expire.
        let otp = OtpRecord::issue("a@x.com");
        let now = otp.issued_at - Duration::minutes(10);
        assert!(!otp.is_expired(now));
    }
}
