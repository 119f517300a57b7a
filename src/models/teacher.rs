//! Teacher model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{is_valid_email, optional_link, optional_slug, optional_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub slug: String,
    pub full_name: String,
    pub position: String,
    pub bio: Option<String>,
    pub qualifications: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub full_name: String,
    pub slug: Option<String>,
    pub position: String,
    pub bio: Option<String>,
    pub qualifications: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub slug: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub qualifications: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn check_email(email: Option<&str>) -> Result<()> {
    match email {
        Some(e) if !is_valid_email(e) => {
            Err(BrightStartError::Validation("email is invalid".to_string()))
        }
        _ => Ok(()),
    }
}

impl Validate for CreateTeacherRequest {
    fn validate(&self) -> Result<()> {
        require_text("full_name", &self.full_name, 120)?;
        require_text("position", &self.position, 120)?;
        optional_slug(self.slug.as_deref())?;
        optional_text("bio", self.bio.as_deref(), 5000)?;
        optional_text("qualifications", self.qualifications.as_deref(), 1000)?;
        check_email(self.email.as_deref())?;
        optional_link("photo_url", self.photo_url.as_deref())
    }
}

impl Validate for UpdateTeacherRequest {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.full_name {
            require_text("full_name", name, 120)?;
        }
        if let Some(position) = &self.position {
            require_text("position", position, 120)?;
        }
        optional_slug(self.slug.as_deref())?;
        optional_text("bio", self.bio.as_deref(), 5000)?;
        optional_text("qualifications", self.qualifications.as_deref(), 1000)?;
        check_email(self.email.as_deref())?;
        optional_link("photo_url", self.photo_url.as_deref())
    }
}
