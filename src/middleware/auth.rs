//! Authentication middleware
//!
//! API routes under `/api/admin` answer 401 without a valid session; the
//! admin UI pages redirect to the login page instead. Verified [`Claims`]
//! are stored in the request extensions for handlers to pick up.

use axum::async_trait;
use axum::body::Body;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::config::settings::AuthConfig;
use crate::services::auth::Claims;
use crate::state::AppState;
use crate::utils::errors::BrightStartError;

pub const LOGIN_PAGE: &str = "/admin/login";

/// Session token from `Authorization: Bearer` or, failing that, the session cookie
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn verified_claims(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    let token = extract_token(headers, &state.settings.auth.cookie_name)?;
    match state.services.auth_service.verify_token(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            None
        }
    }
}

/// Guard for `/api/admin/**`
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match verified_claims(&state, req.headers()) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        None => BrightStartError::Authentication("Login required".to_string()).into_response(),
    }
}

/// Whether an admin UI path is reachable without a session
fn is_public_admin_path(path: &str) -> bool {
    path == LOGIN_PAGE
        || path.starts_with("/admin/login/")
        || path.starts_with("/admin/login.")
}

/// Login page location that returns the user to `original` afterwards
pub fn login_redirect_location(original: &str) -> String {
    format!("{}?redirect={}", LOGIN_PAGE, urlencoding::encode(original))
}

/// Guard for the admin UI pages under `/admin`
pub async fn admin_page_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if is_public_admin_path(&path) {
        return next.run(req).await;
    }

    if let Some(claims) = verified_claims(&state, req.headers()) {
        req.extensions_mut().insert(claims);
        return next.run(req).await;
    }

    let original = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or(path);
    debug!(path = %original, "Redirecting anonymous admin page request to login");

    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, login_redirect_location(&original))
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::FOUND.into_response())
}

/// Claims of the logged-in user, taken from the request extensions
pub struct CurrentUser(pub Claims);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = BrightStartError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| BrightStartError::Authentication("Login required".to_string()))
    }
}

/// `Set-Cookie` value carrying a new session
pub fn session_cookie(config: &AuthConfig, token: &str, max_age_seconds: i64) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name, token, max_age_seconds
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value that removes the session
pub fn clear_session_cookie(config: &AuthConfig) -> Option<HeaderValue> {
    session_cookie(config, "", 0)
}
