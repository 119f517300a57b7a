//! Staff user model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Validate;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::{is_valid_email, require_text};

/// Staff roles, highest first: superadmin > admin > editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Editor,
    Admin,
    Superadmin,
}

impl Role {
    /// Integer rank used for comparisons
    pub fn rank(&self) -> u8 {
        match self {
            Role::Editor => 1,
            Role::Admin => 2,
            Role::Superadmin => 3,
        }
    }

    /// Whether this role grants everything `required` grants
    pub fn includes(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Editor => "editor",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BrightStartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(BrightStartError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parsed role; unknown values in the database degrade to editor
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Editor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// Password reset by a superadmin
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<()> {
        if !is_valid_email(self.email.trim()) {
            return Err(BrightStartError::Validation("email is invalid".to_string()));
        }
        require_text("full_name", &self.full_name, 120)?;
        crate::services::auth::check_password_strength(&self.password)
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.full_name {
            require_text("full_name", name, 120)?;
        }
        if let Some(password) = &self.password {
            crate::services::auth::check_password_strength(password)?;
        }
        Ok(())
    }
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<()> {
        crate::services::auth::check_password_strength(&self.new_password)?;
        if self.new_password == self.current_password {
            return Err(BrightStartError::Validation(
                "new password must differ from the current one".to_string(),
            ));
        }
        Ok(())
    }
}
