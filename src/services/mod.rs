//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod admission;
pub mod upload;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthService, Claims, IssuedToken};
pub use admission::AdmissionService;
pub use upload::{UploadService, UploadKind, UploadedFile};
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub admission_service: AdmissionService,
    pub upload_service: UploadService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Self {
        let auth_service = AuthService::new(&settings.auth);
        let user_service = UserService::new(database.users.clone(), auth_service.clone());
        let admission_service = AdmissionService::new(database.admissions.clone(), &settings.features);
        let upload_service = UploadService::new(&settings.uploads, &settings.features);

        Self {
            auth_service,
            user_service,
            admission_service,
            upload_service,
        }
    }
}
