//! Error handling for BrightStart
//!
//! This module defines the main error type used throughout the application,
//! how each variant maps onto an HTTP response, and how loudly it is logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for BrightStart application
#[derive(Error, Debug)]
pub enum BrightStartError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for BrightStart operations
pub type Result<T> = std::result::Result<T, BrightStartError>;

impl BrightStartError {
    /// Shorthand for a missing record
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        BrightStartError::NotFound { entity, key: key.to_string() }
    }

    /// Map an axum extractor rejection, keeping the 413 for oversized bodies
    pub fn from_rejection(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            BrightStartError::PayloadTooLarge(text)
        } else {
            BrightStartError::Validation(text)
        }
    }

    /// HTTP status returned to the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrightStartError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            BrightStartError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                StatusCode::CONFLICT
            }
            BrightStartError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrightStartError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrightStartError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrightStartError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            BrightStartError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BrightStartError::Token(_) => StatusCode::UNAUTHORIZED,
            BrightStartError::NotFound { .. } => StatusCode::NOT_FOUND,
            BrightStartError::Conflict(_) => StatusCode::CONFLICT,
            BrightStartError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            BrightStartError::Validation(_) => StatusCode::BAD_REQUEST,
            BrightStartError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            BrightStartError::Upload(_) => StatusCode::BAD_REQUEST,
            BrightStartError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            BrightStartError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrightStartError::Serialization(_) => StatusCode::BAD_REQUEST,
            BrightStartError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrightStartError::UrlParse(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            BrightStartError::Database(sqlx::Error::RowNotFound) => "not_found",
            BrightStartError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                "conflict"
            }
            BrightStartError::Database(_) => "database_error",
            BrightStartError::Migration(_) => "migration_error",
            BrightStartError::Config(_) => "config_error",
            BrightStartError::PermissionDenied(_) => "permission_denied",
            BrightStartError::Authentication(_) | BrightStartError::Token(_) => "unauthorized",
            BrightStartError::NotFound { .. } => "not_found",
            BrightStartError::Conflict(_) => "conflict",
            BrightStartError::InvalidStateTransition { .. } => "invalid_state_transition",
            BrightStartError::Validation(_) => "validation_failed",
            BrightStartError::RateLimitExceeded => "rate_limited",
            BrightStartError::Upload(_) => "upload_rejected",
            BrightStartError::PayloadTooLarge(_) => "payload_too_large",
            BrightStartError::PasswordHash(_) => "internal_error",
            BrightStartError::Serialization(_) => "invalid_json",
            BrightStartError::Io(_) => "internal_error",
            BrightStartError::UrlParse(_) => "invalid_url",
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BrightStartError::Database(sqlx::Error::RowNotFound) => ErrorSeverity::Info,
            BrightStartError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ErrorSeverity::Info
            }
            BrightStartError::Database(_) => ErrorSeverity::Critical,
            BrightStartError::Migration(_) => ErrorSeverity::Critical,
            BrightStartError::Config(_) => ErrorSeverity::Critical,
            BrightStartError::PermissionDenied(_) => ErrorSeverity::Warning,
            BrightStartError::Authentication(_) => ErrorSeverity::Warning,
            BrightStartError::Token(_) => ErrorSeverity::Warning,
            BrightStartError::RateLimitExceeded => ErrorSeverity::Warning,
            BrightStartError::Validation(_) => ErrorSeverity::Info,
            BrightStartError::NotFound { .. } => ErrorSeverity::Info,
            BrightStartError::Conflict(_) => ErrorSeverity::Info,
            BrightStartError::InvalidStateTransition { .. } => ErrorSeverity::Info,
            BrightStartError::Upload(_) => ErrorSeverity::Info,
            BrightStartError::PayloadTooLarge(_) => ErrorSeverity::Info,
            BrightStartError::Serialization(_) => ErrorSeverity::Info,
            BrightStartError::UrlParse(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message safe to show to API clients
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else if let BrightStartError::Token(_) = self {
            "Invalid or expired token".to_string()
        } else if self.code() == "conflict" && matches!(self, BrightStartError::Database(_)) {
            "A record with the same unique value already exists".to_string()
        } else if self.code() == "not_found" && matches!(self, BrightStartError::Database(_)) {
            "Record not found".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for BrightStartError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, code = self.code(), status = status.as_u16(), "Request failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(error = %self, code = self.code(), status = status.as_u16(), "Request rejected");
            }
            ErrorSeverity::Info => {
                tracing::debug!(error = %self, code = self.code(), status = status.as_u16(), "Request rejected");
            }
        }

        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.public_message(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
