//! Admission application model
//!
//! Applications are submitted from the public admissions page and worked
//! through by staff. Status moves forward only; `accepted` and `rejected`
//! are final.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{age_in_years, is_valid_email, is_valid_phone, optional_text, require_text};

/// Oldest age (exclusive) accepted on an application
pub const MAX_CHILD_AGE: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    Playgroup,
    Nursery,
    PreK,
    Kindergarten,
}

impl Program {
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Playgroup => "playgroup",
            Program::Nursery => "nursery",
            Program::PreK => "pre_k",
            Program::Kindergarten => "kindergarten",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Pending,
    Reviewing,
    Waitlisted,
    Accepted,
    Rejected,
}

impl AdmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::Pending => "pending",
            AdmissionStatus::Reviewing => "reviewing",
            AdmissionStatus::Waitlisted => "waitlisted",
            AdmissionStatus::Accepted => "accepted",
            AdmissionStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, AdmissionStatus::Accepted | AdmissionStatus::Rejected)
    }

    /// Whether staff may move an application from `self` to `next`
    pub fn can_transition_to(&self, next: AdmissionStatus) -> bool {
        use AdmissionStatus::*;
        if self.is_final() {
            return false;
        }
        match (self, next) {
            (Pending, Reviewing | Waitlisted | Accepted | Rejected) => true,
            (Reviewing, Waitlisted | Accepted | Rejected) => true,
            (Waitlisted, Accepted | Rejected) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = BrightStartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(AdmissionStatus::Pending),
            "reviewing" => Ok(AdmissionStatus::Reviewing),
            "waitlisted" => Ok(AdmissionStatus::Waitlisted),
            "accepted" => Ok(AdmissionStatus::Accepted),
            "rejected" => Ok(AdmissionStatus::Rejected),
            other => Err(BrightStartError::Validation(format!("Unknown admission status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdmissionApplication {
    pub id: Uuid,
    pub reference: String,
    pub child_first_name: String,
    pub child_last_name: String,
    pub child_date_of_birth: NaiveDate,
    pub program: String,
    pub preferred_start_date: Option<NaiveDate>,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdmissionApplication {
    pub fn status(&self) -> Result<AdmissionStatus> {
        self.status.parse()
    }
}

/// Public admission form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAdmissionRequest {
    pub child_first_name: String,
    pub child_last_name: String,
    pub child_date_of_birth: NaiveDate,
    pub program: Program,
    pub preferred_start_date: Option<NaiveDate>,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Staff review payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewAdmissionRequest {
    pub status: Option<AdmissionStatus>,
    pub admin_notes: Option<String>,
}

/// What the applicant gets back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionReceipt {
    pub id: Uuid,
    pub reference: String,
    pub status: AdmissionStatus,
}

impl SubmitAdmissionRequest {
    /// Validate against a given "today" so tests do not depend on the clock
    pub fn validate_on(&self, today: NaiveDate) -> Result<()> {
        require_text("child_first_name", &self.child_first_name, 80)?;
        require_text("child_last_name", &self.child_last_name, 80)?;
        require_text("parent_name", &self.parent_name, 120)?;

        if self.child_date_of_birth >= today {
            return Err(BrightStartError::Validation(
                "child_date_of_birth must be in the past".to_string(),
            ));
        }
        if age_in_years(self.child_date_of_birth, today) >= MAX_CHILD_AGE {
            return Err(BrightStartError::Validation(format!(
                "children must be younger than {} to apply",
                MAX_CHILD_AGE
            )));
        }
        if let Some(start) = self.preferred_start_date {
            if start < today {
                return Err(BrightStartError::Validation(
                    "preferred_start_date must not be in the past".to_string(),
                ));
            }
        }
        if !is_valid_email(self.parent_email.trim()) {
            return Err(BrightStartError::Validation("parent_email is invalid".to_string()));
        }
        if !is_valid_phone(self.parent_phone.trim()) {
            return Err(BrightStartError::Validation("parent_phone is invalid".to_string()));
        }
        optional_text("address", self.address.as_deref(), 500)?;
        optional_text("notes", self.notes.as_deref(), 2000)
    }
}

impl Validate for SubmitAdmissionRequest {
    fn validate(&self) -> Result<()> {
        self.validate_on(Utc::now().date_naive())
    }
}

impl Validate for ReviewAdmissionRequest {
    fn validate(&self) -> Result<()> {
        if self.status.is_none() && self.admin_notes.is_none() {
            return Err(BrightStartError::Validation(
                "status or admin_notes is required".to_string(),
            ));
        }
        optional_text("admin_notes", self.admin_notes.as_deref(), 5000)
    }
}
