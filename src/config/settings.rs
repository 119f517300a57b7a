//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Built front-end to serve at `/` and `/admin`
    pub static_dir: Option<String>,
    pub body_limit_bytes: usize,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub login_attempts_per_minute: u32,
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
}

/// File upload configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    pub dir: String,
    pub public_path: String,
    pub max_file_size_bytes: usize,
}

/// School details shown on the public site
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub school_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for daily rolling log files
    pub file_path: Option<String>,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub admissions_open: bool,
    pub uploads_enabled: bool,
}

impl Settings {
    /// Load settings from defaults, `config.toml` and `BRIGHTSTART_*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("BRIGHTSTART")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BrightStartError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origins: vec!["http://localhost:3000".to_string()],
                static_dir: None,
                body_limit_bytes: 2 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/brightstart".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                token_ttl_hours: 12,
                cookie_name: "bs_session".to_string(),
                secure_cookie: true,
                login_attempts_per_minute: 5,
                bootstrap_email: None,
                bootstrap_password: None,
            },
            uploads: UploadsConfig {
                dir: "./uploads".to_string(),
                public_path: "/uploads".to_string(),
                max_file_size_bytes: 10 * 1024 * 1024,
            },
            site: SiteConfig {
                school_name: "BrightStart Kindergarten".to_string(),
                contact_email: "office@brightstart.example".to_string(),
                contact_phone: None,
                address: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
            features: FeaturesConfig {
                admissions_open: true,
                uploads_enabled: true,
            },
        }
    }
}
