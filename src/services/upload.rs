//! File upload storage
//!
//! Uploaded files land under `<dir>/<yyyy>/<mm>/<uuid>-<name>` and are
//! served back from the configured public path.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::settings::{FeaturesConfig, UploadsConfig};
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{file_extension, sanitize_filename};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => IMAGE_EXTENSIONS,
            UploadKind::Document => DOCUMENT_EXTENSIONS,
        }
    }
}

impl FromStr for UploadKind {
    type Err = BrightStartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(UploadKind::Image),
            "document" => Ok(UploadKind::Document),
            other => Err(BrightStartError::Validation(format!(
                "kind must be image or document, got {}",
                other
            ))),
        }
    }
}

/// What the admin UI gets back after an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Clone)]
pub struct UploadService {
    dir: PathBuf,
    public_path: String,
    max_file_size: usize,
    enabled: bool,
}

/// Content type to report for a whitelisted extension
fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

impl UploadService {
    pub fn new(config: &UploadsConfig, features: &FeaturesConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            public_path: config.public_path.trim_end_matches('/').to_string(),
            max_file_size: config.max_file_size_bytes,
            enabled: features.uploads_enabled,
        }
    }

    /// Check name, type and size before anything touches the disk
    pub fn check(&self, kind: UploadKind, original_name: &str, size: usize) -> Result<String> {
        if !self.enabled {
            return Err(BrightStartError::PermissionDenied("Uploads are disabled".to_string()));
        }
        if size == 0 {
            return Err(BrightStartError::Upload("File is empty".to_string()));
        }
        if size > self.max_file_size {
            return Err(BrightStartError::Upload(format!(
                "File is larger than {} bytes",
                self.max_file_size
            )));
        }

        let extension = file_extension(original_name)
            .ok_or_else(|| BrightStartError::Upload("File has no extension".to_string()))?;
        if !kind.allowed_extensions().contains(&extension.as_str()) {
            return Err(BrightStartError::Upload(format!(
                "Files of type .{} are not allowed; allowed: {}",
                extension,
                kind.allowed_extensions().join(", ")
            )));
        }

        Ok(extension)
    }

    /// Write the file and return its public location
    pub async fn store(&self, kind: UploadKind, original_name: &str, bytes: &[u8]) -> Result<UploadedFile> {
        let extension = self.check(kind, original_name, bytes.len())?;

        let now = Utc::now();
        let relative = PathBuf::from(format!("{:04}", now.year())).join(format!("{:02}", now.month()));
        let target_dir = self.dir.join(&relative);
        tokio::fs::create_dir_all(&target_dir).await?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
        tokio::fs::write(target_dir.join(&file_name), bytes).await?;

        let url = format!(
            "{}/{:04}/{:02}/{}",
            self.public_path,
            now.year(),
            now.month(),
            file_name
        );
        info!(url = %url, size = bytes.len(), "File uploaded");

        Ok(UploadedFile {
            url,
            file_name,
            size: bytes.len(),
            content_type: content_type_for(&extension).to_string(),
        })
    }
}
