//! News post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::Result;
use crate::utils::helpers::{optional_link, optional_slug, optional_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
    /// Set the first time the post is published, never cleared
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl Validate for CreateNewsRequest {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, 200)?;
        require_text("body", &self.body, 50_000)?;
        optional_slug(self.slug.as_deref())?;
        optional_text("excerpt", self.excerpt.as_deref(), 500)?;
        optional_link("cover_image_url", self.cover_image_url.as_deref())
    }
}

impl Validate for UpdateNewsRequest {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title, 200)?;
        }
        if let Some(body) = &self.body {
            require_text("body", body, 50_000)?;
        }
        optional_slug(self.slug.as_deref())?;
        optional_text("excerpt", self.excerpt.as_deref(), 500)?;
        optional_link("cover_image_url", self.cover_image_url.as_deref())
    }
}
