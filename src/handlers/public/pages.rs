//! Site-wide public endpoints: health, home page data, public settings

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::config::SiteConfig;
use crate::database::health_check;
use crate::database::service::HomePage;
use crate::state::AppState;
use crate::utils::errors::Result;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

/// Liveness plus a database ping; 503 when the database is unreachable
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match health_check(state.db.pool()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    let status = if database { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        version: crate::VERSION,
    };
    (status, Json(body))
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub site: SiteConfig,
    #[serde(flatten)]
    pub page: HomePage,
}

/// Everything the landing page renders
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let page = state.db.home_page().await?;
    Ok(Json(HomeResponse {
        site: state.settings.site.clone(),
        page,
    }))
}

/// Settings flagged public, as a key → value map
pub async fn public_settings(State(state): State<AppState>) -> Result<Json<BTreeMap<String, serde_json::Value>>> {
    Ok(Json(state.db.admin.public_settings().await?))
}
