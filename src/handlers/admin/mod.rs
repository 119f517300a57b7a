//! Admin API handlers
//!
//! Everything here sits behind the session guard; each handler checks the
//! minimum role it needs.

pub mod admissions;
pub mod content;
pub mod settings;
pub mod uploads;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::database::Entity;
use crate::models::{AdmissionApplication, Download, Event, GalleryItem, NewsPost, Teacher};
use crate::state::AppState;

/// Multipart overhead allowed on top of the file size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// List, search, create, read, update and delete for one collection
fn content_routes<T: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list::<T>).post(content::create::<T>))
        .route("/search", get(content::search::<T>))
        .route(
            "/:id",
            get(content::get_one::<T>)
                .patch(content::update::<T>)
                .delete(content::delete::<T>),
        )
}

/// Routes mounted under `/api/admin`
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me))
        .route("/me/password", patch(users::change_password))
        .route("/dashboard", get(users::dashboard))
        .nest("/teachers", content_routes::<Teacher>())
        .nest("/events", content_routes::<Event>())
        .nest("/news", content_routes::<NewsPost>())
        .nest("/gallery", content_routes::<GalleryItem>())
        .nest("/downloads", content_routes::<Download>())
        .route("/admissions", get(content::list::<AdmissionApplication>))
        .route(
            "/admissions/:id",
            get(content::get_one::<AdmissionApplication>)
                .patch(admissions::review)
                .delete(content::delete::<AdmissionApplication>),
        )
        .route("/settings", get(settings::list))
        .route("/settings/:key", put(settings::upsert).delete(settings::delete))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", patch(users::update).delete(users::delete))
        .route(
            "/uploads",
            post(uploads::upload).layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
}
