//! Downloadable document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{is_valid_link, optional_link, optional_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Download {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub category: String,
    pub is_published: bool,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDownloadRequest {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDownloadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

pub const DEFAULT_DOWNLOAD_CATEGORY: &str = "forms";

impl CreateDownloadRequest {
    /// File name to show, falling back to the last path segment of the URL
    pub fn resolved_file_name(&self) -> String {
        self.file_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                self.file_url
                    .rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or("download")
                    .to_string()
            })
    }
}

fn check_size(size: Option<i64>) -> Result<()> {
    match size {
        Some(s) if s < 0 => Err(BrightStartError::Validation(
            "file_size must not be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

impl Validate for CreateDownloadRequest {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, 200)?;
        optional_text("description", self.description.as_deref(), 2000)?;
        if !is_valid_link(&self.file_url) {
            return Err(BrightStartError::Validation(
                "file_url must be an http(s) URL or a site path".to_string(),
            ));
        }
        optional_text("file_name", self.file_name.as_deref(), 200)?;
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        check_size(self.file_size)
    }
}

impl Validate for UpdateDownloadRequest {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title, 200)?;
        }
        optional_text("description", self.description.as_deref(), 2000)?;
        optional_link("file_url", self.file_url.as_deref())?;
        if let Some(name) = &self.file_name {
            require_text("file_name", name, 200)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category, 50)?;
        }
        check_size(self.file_size)
    }
}
