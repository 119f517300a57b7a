//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::is_valid_email;
use super::Settings;

/// Minimum length of the HMAC secret used for session tokens
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_uploads_config(&settings.uploads)?;
    validate_site_config(&settings.site)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BrightStartError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(BrightStartError::Config("Server port must be greater than 0".to_string()));
    }

    if config.body_limit_bytes == 0 {
        return Err(BrightStartError::Config(
            "Request body limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BrightStartError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(BrightStartError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BrightStartError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        return Err(BrightStartError::Config(format!(
            "JWT secret must be at least {} bytes",
            MIN_JWT_SECRET_LEN
        )));
    }

    if config.token_ttl_hours <= 0 || config.token_ttl_hours > 24 * 30 {
        return Err(BrightStartError::Config(
            "Token TTL must be between 1 hour and 30 days".to_string(),
        ));
    }

    if config.cookie_name.is_empty()
        || !config.cookie_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(BrightStartError::Config(
            "Cookie name must be a non-empty token of letters, digits, '-' or '_'".to_string(),
        ));
    }

    if config.login_attempts_per_minute == 0 {
        return Err(BrightStartError::Config(
            "Login attempts per minute must be greater than 0".to_string(),
        ));
    }

    match (&config.bootstrap_email, &config.bootstrap_password) {
        (Some(email), Some(password)) => {
            if !is_valid_email(email) {
                return Err(BrightStartError::Config("Bootstrap email is invalid".to_string()));
            }
            if password.chars().count() < crate::services::auth::MIN_PASSWORD_LEN {
                return Err(BrightStartError::Config(
                    "Bootstrap password is too short".to_string(),
                ));
            }
        }
        (None, None) => {}
        _ => {
            return Err(BrightStartError::Config(
                "Bootstrap email and password must be set together".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate uploads configuration
fn validate_uploads_config(config: &super::UploadsConfig) -> Result<()> {
    if config.dir.is_empty() {
        return Err(BrightStartError::Config("Uploads directory is required".to_string()));
    }

    if !config.public_path.starts_with('/') || config.public_path.ends_with('/') {
        return Err(BrightStartError::Config(
            "Uploads public path must start with '/' and not end with '/'".to_string(),
        ));
    }

    if config.max_file_size_bytes == 0 {
        return Err(BrightStartError::Config(
            "Max upload size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate site configuration
fn validate_site_config(config: &super::SiteConfig) -> Result<()> {
    if config.school_name.trim().is_empty() {
        return Err(BrightStartError::Config("School name is required".to_string()));
    }

    if !is_valid_email(&config.contact_email) {
        return Err(BrightStartError::Config("Contact email is invalid".to_string()));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BrightStartError::Config("Log level is required".to_string()));
    }

    if tracing_subscriber::EnvFilter::try_new(&config.level).is_err() {
        return Err(BrightStartError::Config(format!(
            "Invalid log level: {}",
            config.level
        )));
    }

    if !["pretty", "json"].contains(&config.format.as_str()) {
        return Err(BrightStartError::Config(format!(
            "Invalid log format: {}. Valid formats: pretty, json",
            config.format
        )));
    }

    Ok(())
}
