//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{optional_link, optional_slug, optional_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

pub const DEFAULT_EVENT_CATEGORY: &str = "general";

fn check_range(starts_at: Option<DateTime<Utc>>, ends_at: Option<DateTime<Utc>>) -> Result<()> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            return Err(BrightStartError::Validation(
                "ends_at must not be before starts_at".to_string(),
            ));
        }
    }
    Ok(())
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, 200)?;
        optional_slug(self.slug.as_deref())?;
        optional_text("description", self.description.as_deref(), 10_000)?;
        optional_text("location", self.location.as_deref(), 200)?;
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        optional_link("image_url", self.image_url.as_deref())?;
        check_range(Some(self.starts_at), self.ends_at)
    }
}

impl Validate for UpdateEventRequest {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title, 200)?;
        }
        optional_slug(self.slug.as_deref())?;
        optional_text("description", self.description.as_deref(), 10_000)?;
        optional_text("location", self.location.as_deref(), 200)?;
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        optional_link("image_url", self.image_url.as_deref())?;
        check_range(self.starts_at, self.ends_at)
    }
}

impl UpdateEventRequest {
    /// Check the merged date range against the stored event
    pub fn check_against(&self, current: &Event) -> Result<()> {
        let starts_at = self.starts_at.unwrap_or(current.starts_at);
        let ends_at = self.ends_at.or(current.ends_at);
        check_range(Some(starts_at), ends_at)
    }
}
