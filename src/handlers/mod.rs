//! HTTP handlers module
//!
//! This module contains all HTTP handlers organized by audience:
//! - Public handlers for the website and its forms
//! - Admin handlers for the content management API
//!
//! [`build_router`] wires them together with the middleware stack and the
//! static file services.

pub mod admin;
pub mod extract;
pub mod public;

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::warn;

use crate::config::Settings;
use crate::middleware::{admin_page_guard, request_logging, require_auth};
use crate::state::AppState;
use crate::utils::errors::BrightStartError;

/// JSON 404 for unknown API paths
async fn api_not_found() -> Response {
    BrightStartError::NotFound { entity: "route", key: "requested path".to_string() }.into_response()
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Static admin UI under `/admin`, behind the page guard
fn admin_ui(state: &AppState, static_dir: &Path) -> Router<AppState> {
    let index = static_dir.join("admin").join("index.html");
    let ui = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index));

    Router::new()
        .route_service("/admin", ui.clone())
        .route_service("/admin/", ui.clone())
        .route_service("/admin/*path", ui)
        .layer(from_fn_with_state(state.clone(), admin_page_guard))
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();

    let admin_api = admin::routes(settings.uploads.max_file_size_bytes)
        .layer(from_fn_with_state(state.clone(), require_auth));

    let api = public::routes()
        .nest("/admin", admin_api)
        .fallback(api_not_found);

    let mut router = Router::new()
        .nest("/api", api)
        .nest_service(&settings.uploads.public_path, ServeDir::new(&settings.uploads.dir));

    router = match settings.server.static_dir.as_deref() {
        Some(dir) => {
            let dir = Path::new(dir);
            let site = ServeDir::new(dir)
                .append_index_html_on_directories(true)
                .fallback(ServeFile::new(dir.join("index.html")));
            router.merge(admin_ui(&state, dir)).fallback_service(site)
        }
        None => router.fallback(api_not_found),
    };

    router
        .layer(DefaultBodyLimit::max(settings.server.body_limit_bytes))
        .layer(cors_layer(&settings))
        .layer(from_fn(request_logging))
        .with_state(state)
}
