//! User service implementation
//!
//! This service handles staff login, password changes, account management
//! by superadmins and the first-run bootstrap account.

use tracing::{info, warn, debug};
use uuid::Uuid;

use crate::config::settings::AuthConfig;
use crate::database::repositories::{NewUser, UserChanges, UserRepository};
use crate::models::user::{ChangePasswordRequest, CreateUserRequest, LoginRequest, LoginResponse, Role, UpdateUserRequest, User};
use crate::models::Validate;
use crate::services::auth::{AuthService, Claims};
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::logging::{log_admin_action, log_auth_event};

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// User service for managing staff accounts
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
    auth: AuthService,
}

/// Reject changes a superadmin may not make to their own account
fn check_self_update(actor_id: Uuid, target_id: Uuid, request: &UpdateUserRequest) -> Result<()> {
    if actor_id != target_id {
        return Ok(());
    }
    if matches!(request.role, Some(role) if role != Role::Superadmin) {
        return Err(BrightStartError::PermissionDenied("You cannot demote yourself".to_string()));
    }
    if request.is_active == Some(false) {
        return Err(BrightStartError::PermissionDenied("You cannot deactivate yourself".to_string()));
    }
    Ok(())
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository, auth: AuthService) -> Self {
        Self {
            user_repository,
            auth,
        }
    }

    /// Check credentials, stamp the login and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let email = request.email.trim().to_lowercase();
        debug!(email = %email, "Login attempt");

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(BrightStartError::Authentication(BAD_CREDENTIALS.to_string()));
        };

        if !self.auth.verify_password(&request.password, &user.password_hash) {
            log_auth_event(&email, "login", false, Some("wrong password"));
            return Err(BrightStartError::Authentication(BAD_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            log_auth_event(&email, "login", false, Some("account disabled"));
            return Err(BrightStartError::Authentication("Account is disabled".to_string()));
        }

        self.user_repository.touch_last_login(user.id).await?;
        let issued = self.auth.issue_token(&user)?;
        log_auth_event(&email, "login", true, None);

        let user = self.user_repository.find_by_id(user.id).await?.unwrap_or(user);
        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// The account behind a session; disabled or deleted accounts lose access
    pub async fn current_user(&self, claims: &Claims) -> Result<User> {
        let user = self.user_repository.find_by_id(claims.user_id()?).await?
            .ok_or_else(|| BrightStartError::Authentication("Account no longer exists".to_string()))?;

        if !user.is_active {
            return Err(BrightStartError::Authentication("Account is disabled".to_string()));
        }

        Ok(user)
    }

    /// Change the caller's own password
    pub async fn change_password(&self, claims: &Claims, request: ChangePasswordRequest) -> Result<()> {
        request.validate()?;
        let user = self.current_user(claims).await?;

        if !self.auth.verify_password(&request.current_password, &user.password_hash) {
            log_auth_event(&user.email, "change_password", false, Some("wrong current password"));
            return Err(BrightStartError::Validation("Current password is incorrect".to_string()));
        }

        let changes = UserChanges {
            password_hash: Some(self.auth.hash_password(&request.new_password)?),
            ..Default::default()
        };
        self.user_repository.update(user.id, changes).await?;
        log_auth_event(&user.email, "change_password", true, None);

        Ok(())
    }

    /// List all staff accounts
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repository.list().await
    }

    /// Create a staff account
    pub async fn create_user(&self, actor: &Claims, request: CreateUserRequest) -> Result<User> {
        actor.require(Role::Superadmin)?;
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(BrightStartError::Conflict(format!("A user with email {} already exists", email)));
        }

        let user = self.user_repository.create(NewUser {
            email,
            password_hash: self.auth.hash_password(&request.password)?,
            full_name: request.full_name,
            role: request.role,
        }).await?;

        log_admin_action(&actor.sub, "create_user", Some(&user.id.to_string()), Some(user.role.as_str()));
        Ok(user)
    }

    /// Update name, role, active flag or reset the password
    pub async fn update_user(&self, actor: &Claims, id: Uuid, request: UpdateUserRequest) -> Result<User> {
        actor.require(Role::Superadmin)?;
        request.validate()?;
        check_self_update(actor.user_id()?, id, &request)?;

        let password_hash = match &request.password {
            Some(password) => Some(self.auth.hash_password(password)?),
            None => None,
        };

        let user = self.user_repository.update(id, UserChanges {
            full_name: request.full_name,
            role: request.role,
            is_active: request.is_active,
            password_hash,
        }).await?;

        log_admin_action(&actor.sub, "update_user", Some(&id.to_string()), None);
        Ok(user)
    }

    /// Delete a staff account
    pub async fn delete_user(&self, actor: &Claims, id: Uuid) -> Result<()> {
        actor.require(Role::Superadmin)?;
        if actor.user_id()? == id {
            return Err(BrightStartError::PermissionDenied("You cannot delete yourself".to_string()));
        }

        if !self.user_repository.delete(id).await? {
            return Err(BrightStartError::not_found("user", id));
        }

        log_admin_action(&actor.sub, "delete_user", Some(&id.to_string()), None);
        Ok(())
    }

    /// Create the first superadmin when the users table is empty.
    ///
    /// Returns the account when one was created.
    pub async fn ensure_bootstrap_user(&self, config: &AuthConfig) -> Result<Option<User>> {
        let (Some(email), Some(password)) = (&config.bootstrap_email, &config.bootstrap_password) else {
            return Ok(None);
        };

        if self.user_repository.count().await? > 0 {
            debug!("Users already exist, skipping bootstrap account");
            return Ok(None);
        }

        let user = self.user_repository.create(NewUser {
            email: email.clone(),
            password_hash: self.auth.hash_password(password)?,
            full_name: "Administrator".to_string(),
            role: Role::Superadmin,
        }).await?;

        info!(user_id = %user.id, email = %user.email, "Bootstrap superadmin created");
        warn!("Change the bootstrap password and remove it from configuration");
        Ok(Some(user))
    }
}
