//! Multipart file uploads for images and documents

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::middleware::CurrentUser;
use crate::models::Role;
use crate::services::{UploadKind, UploadedFile};
use crate::state::AppState;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::logging::log_admin_action;

/// Accepts a `file` part and an optional `kind` part (`image` by default)
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>)> {
    claims.require(Role::Editor)?;

    let mut kind = UploadKind::Image;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BrightStartError::from_rejection(e.status(), e.body_text()))?
    {
        match field.name() {
            Some("kind") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| BrightStartError::from_rejection(e.status(), e.body_text()))?;
                kind = value.trim().parse()?;
            }
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| BrightStartError::Upload("file part has no file name".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| BrightStartError::from_rejection(e.status(), e.body_text()))?;
                file = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (name, bytes) = file.ok_or_else(|| BrightStartError::Upload("missing file part".to_string()))?;
    let stored = state.services.upload_service.store(kind, &name, &bytes).await?;
    log_admin_action(&claims.sub, "upload", Some(&stored.url), None);

    Ok((StatusCode::CREATED, Json(stored)))
}
