//! Login and logout

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::handlers::extract::ApiJson;
use crate::middleware::auth::{clear_session_cookie, session_cookie};
use crate::models::LoginRequest;
use crate::state::AppState;
use crate::utils::errors::{BrightStartError, Result};

/// Exchange email and password for a session token and cookie
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Response> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(BrightStartError::Validation("email and password are required".to_string()));
    }

    state.login_limiter.check(&request.email)?;
    let session = state.services.user_service.login(request).await?;

    let mut headers = HeaderMap::new();
    let max_age = state.services.auth_service.token_ttl_seconds();
    if let Some(cookie) = session_cookie(&state.settings.auth, &session.token, max_age) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((headers, Json(session)).into_response())
}

/// Drop the session cookie
pub async fn logout(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = clear_session_cookie(&state.settings.auth) {
        headers.insert(header::SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, headers).into_response()
}
