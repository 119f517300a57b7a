//! Gallery image model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{is_valid_link, optional_link, optional_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGalleryItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGalleryItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: Option<bool>,
}

pub const DEFAULT_GALLERY_CATEGORY: &str = "campus";

impl Validate for CreateGalleryItemRequest {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, 200)?;
        optional_text("description", self.description.as_deref(), 2000)?;
        if !is_valid_link(&self.image_url) {
            return Err(BrightStartError::Validation(
                "image_url must be an http(s) URL or a site path".to_string(),
            ));
        }
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        Ok(())
    }
}

impl Validate for UpdateGalleryItemRequest {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title, 200)?;
        }
        optional_text("description", self.description.as_deref(), 2000)?;
        optional_link("image_url", self.image_url.as_deref())?;
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        Ok(())
    }
}
