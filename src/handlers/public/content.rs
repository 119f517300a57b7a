//! Public listings and detail pages for site content
//!
//! These only ever return rows that are published (or active, for teachers).

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use uuid::Uuid;

use crate::database::Entity;
use crate::handlers::extract::{ApiPath, ApiQuery};
use crate::models::{Download, ListQuery, Page};
use crate::state::AppState;
use crate::utils::errors::{BrightStartError, Result};

/// Published rows of `T`, filtered and paginated
pub async fn list<T: Entity>(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Page<T>>> {
    Ok(Json(state.db.repository::<T>().get_all(&query, true).await?))
}

/// One published row of `T` by slug
pub async fn by_slug<T: Entity>(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<T>> {
    state
        .db
        .repository::<T>()
        .get_by_slug(&slug, true)
        .await?
        .map(Json)
        .ok_or_else(|| BrightStartError::not_found(T::NAME, slug))
}

/// Count the download and send the browser to the file
pub async fn download_file(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let file_url = state
        .db
        .downloads
        .record_download(id)
        .await?
        .ok_or_else(|| BrightStartError::not_found(Download::NAME, id))?;

    Ok(Redirect::temporary(&file_url))
}
