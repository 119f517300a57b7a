//! Admission review

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::handlers::extract::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;
use crate::models::{AdmissionApplication, ReviewAdmissionRequest};
use crate::state::AppState;
use crate::utils::errors::Result;

/// Change status and/or notes on an application
pub async fn review(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ReviewAdmissionRequest>,
) -> Result<Json<AdmissionApplication>> {
    let application = state.services.admission_service.review(&claims, id, request).await?;
    Ok(Json(application))
}
