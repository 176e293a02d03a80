//! Account service: signup, OTP verification, resend, and login.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use portal_mailer::{EmailMessage, Mailer};
use portal_models::{LoginRequest, OtpRecord, SignupRequest, User, UserProfile};
use portal_store::{OtpRepository, StoreError, UserRepository};

use crate::error::{ApiError, ApiResult};
use crate::metrics;

/// Orchestrates the account lifecycle over the registries and mailer.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    otps: OtpRepository,
    mailer: Arc<Mailer>,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(users: UserRepository, otps: OtpRepository, mailer: Arc<Mailer>) -> Self {
        Self { users, otps, mailer }
    }

    /// Register a new inactive account and issue its first OTP.
    ///
    /// The duplicate check and insert are atomic at the repository
    /// boundary; two racing signups with the same email cannot both
    /// succeed.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<()> {
        let user = User::new(
            &request.firstname,
            &request.lastname,
            &request.email,
            &request.phone,
            &request.password,
        );

        match self.users.create(user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => {
                metrics::record_signup("duplicate");
                return Err(ApiError::DuplicateAccount);
            }
            Err(e) => return Err(e.into()),
        }

        let otp = OtpRecord::issue(&request.email);
        let code = otp.code;
        self.otps.create(otp).await;

        self.send_in_background(EmailMessage::new(
            &request.email,
            "OTP confirmation",
            format!(
                "Hello {} {}, Please use {} to complete your signup",
                request.firstname, request.lastname, code
            ),
        ));

        metrics::record_signup("created");
        info!(email = %request.email, "Signup recorded, OTP issued");
        Ok(())
    }

    /// Verify a submitted code and activate the account.
    ///
    /// The consumed code is deleted, so it cannot re-trigger activation
    /// within its validity window.
    pub async fn verify_otp(&self, email: &str, submitted_code: &str) -> ApiResult<UserProfile> {
        // A non-numeric path segment can never match a stored code.
        let code: u32 = submitted_code.parse().map_err(|_| {
            metrics::record_verification("invalid");
            ApiError::InvalidCode
        })?;

        let otp = self.otps.find_match(email, code).await.ok_or_else(|| {
            metrics::record_verification("invalid");
            ApiError::InvalidCode
        })?;

        if otp.is_expired(Utc::now()) {
            metrics::record_verification("expired");
            return Err(ApiError::CodeExpired);
        }

        let user = match self.users.activate(email).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => return Err(ApiError::AccountNotFound),
            Err(e) => return Err(e.into()),
        };

        self.otps.remove(otp.id).await;

        self.send_in_background(EmailMessage::new(
            email,
            "Registration completed",
            "Welcome to our job platform. Let us help you find your desired job.",
        ));

        metrics::record_verification("activated");
        info!(email = %email, "Account activated");
        Ok(user.profile())
    }

    /// Issue a fresh OTP for an existing account.
    ///
    /// Earlier unexpired codes stay valid; only expired ones for this
    /// email are purged.
    pub async fn resend_otp(&self, email: &str) -> ApiResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or(ApiError::AccountNotFound)?;

        let purged = self.otps.purge_expired(email, Utc::now()).await;
        if purged > 0 {
            info!(email = %email, purged, "Purged expired OTPs");
        }

        let otp = OtpRecord::issue(email);
        let code = otp.code;
        self.otps.create(otp).await;

        self.send_in_background(EmailMessage::new(
            email,
            "OTP confirmation",
            format!(
                "Hello {} {}, Please use {} to complete your signup",
                user.firstname, user.lastname, code
            ),
        ));

        Ok(())
    }

    /// Authenticate by email or phone plus password.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<UserProfile> {
        let user = self
            .users
            .find_by_email_or_phone(&request.email_or_phone)
            .await
            .ok_or_else(|| {
                metrics::record_login("invalid");
                ApiError::InvalidCredentials
            })?;

        // Constant-time comparison; a mismatch is indistinguishable
        // from an unknown identifier.
        if !user.password.verify(&request.password) {
            metrics::record_login("invalid");
            return Err(ApiError::InvalidCredentials);
        }

        if !user.is_active() {
            metrics::record_login("pending");
            return Err(ApiError::AccountPending);
        }

        metrics::record_login("success");
        Ok(user.profile())
    }

    /// Fire a mail send on its own task. The request does not wait on
    /// delivery; the outcome is logged and counted by the mailer.
    fn send_in_background(&self, message: EmailMessage) {
        let _handle = Arc::clone(&self.mailer).spawn_send(message);
    }
}
