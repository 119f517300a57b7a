//! Generic admin CRUD handlers
//!
//! One set of handlers serves every content collection. Reads and writes
//! need the entity's write role, deletes its delete role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::Entity;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::CurrentUser;
use crate::models::{ListQuery, Page};
use crate::state::AppState;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::logging::log_admin_action;

const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<u32>,
}

pub async fn list<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Page<T>>> {
    claims.require(T::WRITE_ROLE)?;
    Ok(Json(state.db.repository::<T>().get_all(&query, false).await?))
}

pub async fn get_one<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<T>> {
    claims.require(T::WRITE_ROLE)?;
    Ok(Json(state.db.repository::<T>().require(id).await?))
}

pub async fn search<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<T>>> {
    claims.require(T::WRITE_ROLE)?;
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(state.db.repository::<T>().search(&params.q, limit, false).await?))
}

pub async fn create<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(input): ApiJson<T::Create>,
) -> Result<(StatusCode, Json<T>)> {
    claims.require(T::WRITE_ROLE)?;
    let created = state.db.repository::<T>().create(input, Some(claims.user_id()?)).await?;
    log_admin_action(&claims.sub, "create", Some(T::TABLE), None);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<T::Update>,
) -> Result<Json<T>> {
    claims.require(T::WRITE_ROLE)?;
    let updated = state.db.repository::<T>().update(id, input, Some(claims.user_id()?)).await?;
    log_admin_action(&claims.sub, "update", Some(T::TABLE), Some(&id.to_string()));
    Ok(Json(updated))
}

pub async fn delete<T: Entity>(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    claims.require(T::DELETE_ROLE)?;
    if !state.db.repository::<T>().delete(id).await? {
        return Err(BrightStartError::not_found(T::NAME, id));
    }
    log_admin_action(&claims.sub, "delete", Some(T::TABLE), Some(&id.to_string()));
    Ok(StatusCode::NO_CONTENT)
}
