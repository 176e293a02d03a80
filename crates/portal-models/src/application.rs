//! Job application models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Academic qualification accepted on an application. Closed set,
/// validated at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualification {
    Bsc,
    Hnd,
    Msc,
    Phd,
}

impl Qualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bsc => "bsc",
            Self::Hnd => "hnd",
            Self::Msc => "msc",
            Self::Phd => "phd",
        }
    }
}

impl FromStr for Qualification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bsc" => Ok(Self::Bsc),
            "hnd" => Ok(Self::Hnd),
            "msc" => Ok(Self::Msc),
            "phd" => Ok(Self::Phd),
            other => Err(format!(
                "'{other}' is not a valid qualification (expected one of: bsc, hnd, msc, phd)"
            )),
        }
    }
}

/// Application lifecycle state. The admin update path parses into this
/// same closed set; free-form status strings are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Submitted,
    Reviewing,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewing => "reviewing",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => Ok(Self::Submitted),
            "reviewing" => Ok(Self::Reviewing),
            "shortlisted" => Ok(Self::Shortlisted),
            "rejected" => Ok(Self::Rejected),
            "hired" => Ok(Self::Hired),
            other => Err(format!(
                "'{other}' is not a valid application status \
                 (expected one of: submitted, reviewing, shortlisted, rejected, hired)"
            )),
        }
    }
}

/// A recorded job application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub job_id: String,
    pub qualification: Qualification,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    /// Record a new application with status `submitted`.
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        job_id: impl Into<String>,
        qualification: Qualification,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
            job_id: job_id.into(),
            qualification,
            status: ApplicationStatus::Submitted,
            applied_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_parse() {
        assert_eq!("bsc".parse::<Qualification>().unwrap(), Qualification::Bsc);
        assert_eq!("PHD".parse::<Qualification>().unwrap(), Qualification::Phd);
        assert!("bachelor".parse::<Qualification>().is_err());
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            "Shortlisted".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert!("whatever".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_new_application_is_submitted() {
        let app = JobApplication::new("Ada", "Obi", "a@x.com", "job-1", Qualification::Bsc);
        assert_eq!(app.status, ApplicationStatus::Submitted);
        assert_eq!(app.applied_at, app.updated_at);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Hired).unwrap(),
            "\"hired\""
        );
    }
}
