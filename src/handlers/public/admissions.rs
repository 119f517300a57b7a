//! Public admission form

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::extract::ApiJson;
use crate::models::{AdmissionReceipt, SubmitAdmissionRequest};
use crate::state::AppState;
use crate::utils::errors::Result;

pub async fn submit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitAdmissionRequest>,
) -> Result<(StatusCode, Json<AdmissionReceipt>)> {
    let receipt = state.services.admission_service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
