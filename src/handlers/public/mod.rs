//! Public site handlers
//!
//! Read-only content for the website plus the two public forms:
//! admission applications and staff login.

pub mod admissions;
pub mod auth;
pub mod content;
pub mod pages;

use axum::routing::{get, post};
use axum::Router;

use crate::models::{Download, Event, GalleryItem, NewsPost, Teacher};
use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(pages::health))
        .route("/pages/home", get(pages::home))
        .route("/settings/public", get(pages::public_settings))
        .route("/teachers", get(content::list::<Teacher>))
        .route("/teachers/:slug", get(content::by_slug::<Teacher>))
        .route("/events", get(content::list::<Event>))
        .route("/events/:slug", get(content::by_slug::<Event>))
        .route("/news", get(content::list::<NewsPost>))
        .route("/news/:slug", get(content::by_slug::<NewsPost>))
        .route("/gallery", get(content::list::<GalleryItem>))
        .route("/downloads", get(content::list::<Download>))
        .route("/downloads/:id/file", get(content::download_file))
        .route("/admissions", post(admissions::submit))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}
