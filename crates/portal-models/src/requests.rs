//! Request payloads with validation rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "firstname is required"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "lastname is required"))]
    pub lastname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login payload. The identifier matches either email or phone.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "emailOrPhone is required"))]
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Job application payload. The qualification string is parsed into the
/// closed [`crate::Qualification`] set by the application service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(min = 1, message = "firstname is required"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "lastname is required"))]
    pub lastname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "jobId is required"))]
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[validate(length(min = 1, message = "qualification is required"))]
    pub qualification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rejects_bad_email() {
        let req = SignupRequest {
            firstname: "Ada".to_string(),
            lastname: "Obi".to_string(),
            email: "not-an-email".to_string(),
            phone: "08031234567".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_signup_rejects_missing_field() {
        let req = SignupRequest {
            firstname: String::new(),
            lastname: "Obi".to_string(),
            email: "ada@example.com".to_string(),
            phone: "08031234567".to_string(),
            password: "pw".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("firstname"));
    }

    #[test]
    fn test_login_field_rename() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"emailOrPhone":"a@x.com","password":"pw"}"#).unwrap();
        assert_eq!(req.email_or_phone, "a@x.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_apply_validates() {
        let req: ApplyRequest = serde_json::from_str(
            r#"{"firstname":"Ada","lastname":"Obi","email":"a@x.com","jobId":"j1","qualification":"bsc"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
