//! Staff account management and the caller's own account

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::handlers::extract::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;
use crate::models::{ChangePasswordRequest, CreateUserRequest, DashboardStats, Role, UpdateUserRequest, User};
use crate::state::AppState;
use crate::utils::errors::Result;

pub async fn me(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<User>> {
    Ok(Json(state.services.user_service.current_user(&claims).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode> {
    state.services.user_service.change_password(&claims, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<DashboardStats>> {
    claims.require(Role::Editor)?;
    Ok(Json(state.db.dashboard_stats().await?))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<User>>> {
    claims.require(Role::Superadmin)?;
    Ok(Json(state.services.user_service.list_users().await?))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.services.user_service.create_user(&claims, request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>> {
    Ok(Json(state.services.user_service.update_user(&claims, id, request).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    state.services.user_service.delete_user(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
