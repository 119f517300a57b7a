//! Site settings

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::extract::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;
use crate::models::admin::is_valid_setting_key;
use crate::models::{Role, SiteSetting, UpsertSettingRequest, Validate};
use crate::state::AppState;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::logging::log_admin_action;

fn check_key(key: &str) -> Result<()> {
    if is_valid_setting_key(key) {
        Ok(())
    } else {
        Err(BrightStartError::Validation(
            "setting keys are lowercase letters, digits, '_' and '.' separators".to_string(),
        ))
    }
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<SiteSetting>>> {
    claims.require(Role::Admin)?;
    Ok(Json(state.db.admin.list_settings().await?))
}

pub async fn upsert(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(key): ApiPath<String>,
    ApiJson(request): ApiJson<UpsertSettingRequest>,
) -> Result<Json<SiteSetting>> {
    claims.require(Role::Admin)?;
    check_key(&key)?;
    request.validate()?;

    let setting = state.db.admin.upsert_setting(&key, request, Some(claims.user_id()?)).await?;
    log_admin_action(&claims.sub, "upsert_setting", Some(&key), None);
    Ok(Json(setting))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(key): ApiPath<String>,
) -> Result<StatusCode> {
    claims.require(Role::Admin)?;
    if !state.db.admin.delete_setting(&key).await? {
        return Err(BrightStartError::not_found("setting", key));
    }
    log_admin_action(&claims.sub, "delete_setting", Some(&key), None);
    Ok(StatusCode::NO_CONTENT)
}
