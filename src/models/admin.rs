//! Admin model: site settings and dashboard figures

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSetting {
    pub key: String,
    pub value: serde_json::Value,
    pub is_public: bool,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertSettingRequest {
    pub value: serde_json::Value,
    #[serde(default)]
    pub is_public: bool,
}

/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub teachers: i64,
    pub active_teachers: i64,
    pub events: i64,
    pub upcoming_events: i64,
    pub news_posts: i64,
    pub gallery_items: i64,
    pub downloads: i64,
    pub total_downloads: i64,
    pub admissions: i64,
    pub pending_admissions: i64,
    pub users: i64,
}

/// Setting keys are dotted lowercase identifiers such as `contact.phone`
pub fn is_valid_setting_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 100
        && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
        && !key.starts_with('.')
        && !key.ends_with('.')
        && !key.contains("..")
}

impl Validate for UpsertSettingRequest {
    fn validate(&self) -> Result<()> {
        let size = serde_json::to_vec(&self.value)?.len();
        if size > 64 * 1024 {
            return Err(BrightStartError::Validation(
                "setting value must be at most 64 KiB".to_string(),
            ));
        }
        Ok(())
    }
}
