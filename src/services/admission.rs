//! Admission service implementation
//!
//! This service accepts public applications and applies staff reviews.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::settings::FeaturesConfig;
use crate::database::CrudRepository;
use crate::models::admission::{AdmissionApplication, AdmissionReceipt, AdmissionStatus, ReviewAdmissionRequest, SubmitAdmissionRequest};
use crate::models::Role;
use crate::services::auth::Claims;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::logging::{log_admin_action, log_submission};

#[derive(Clone)]
pub struct AdmissionService {
    applications: CrudRepository<AdmissionApplication>,
    admissions_open: bool,
}

impl AdmissionService {
    pub fn new(applications: CrudRepository<AdmissionApplication>, features: &FeaturesConfig) -> Self {
        Self {
            applications,
            admissions_open: features.admissions_open,
        }
    }

    /// Validate and store a public application
    pub async fn submit(&self, request: SubmitAdmissionRequest) -> Result<AdmissionReceipt> {
        if !self.admissions_open {
            return Err(BrightStartError::PermissionDenied(
                "Admissions are currently closed".to_string(),
            ));
        }

        request.validate_on(Utc::now().date_naive())?;
        let application = self.applications.create(request, None).await?;
        log_submission("admission", &application.reference);

        Ok(AdmissionReceipt {
            id: application.id,
            reference: application.reference,
            status: AdmissionStatus::Pending,
        })
    }

    /// Move an application through review and record notes
    pub async fn review(&self, actor: &Claims, id: Uuid, request: ReviewAdmissionRequest) -> Result<AdmissionApplication> {
        actor.require(Role::Admin)?;
        let requested = request.status;

        let application = self.applications.update(id, request, Some(actor.user_id()?)).await?;

        if let Some(status) = requested {
            info!(application_id = %id, status = %status, "Admission application reviewed");
        }
        log_admin_action(
            &actor.sub,
            "review_admission",
            Some(&application.reference),
            Some(application.status.as_str()),
        );

        Ok(application)
    }
}
