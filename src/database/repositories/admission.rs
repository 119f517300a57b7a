//! Admission application repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::Entity;
use crate::models::admission::{AdmissionApplication, AdmissionStatus, ReviewAdmissionRequest, SubmitAdmissionRequest};
use crate::models::listing::SortOrder;
use crate::models::Role;
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::generate_reference;

const ADMISSION_COLUMNS: &str = "id, reference, child_first_name, child_last_name, child_date_of_birth, program, preferred_start_date, parent_name, parent_email, parent_phone, address, notes, status, admin_notes, reviewed_by, reviewed_at, created_at, updated_at";

const REFERENCE_ATTEMPTS: usize = 3;

#[async_trait]
impl Entity for AdmissionApplication {
    type Create = SubmitAdmissionRequest;
    type Update = ReviewAdmissionRequest;

    const NAME: &'static str = "admission application";
    const TABLE: &'static str = "admission_applications";
    const COLUMNS: &'static str = ADMISSION_COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["reference", "child_first_name", "child_last_name", "parent_name", "parent_email"];
    const FILTER_COLUMNS: &'static [&'static str] = &["status", "program"];
    const SORT_COLUMNS: &'static [&'static str] = &["created_at", "child_last_name", "status", "preferred_start_date"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("created_at", SortOrder::Desc);
    const NULLABLE_SORT_COLUMNS: &'static [&'static str] = &["preferred_start_date"];
    const WRITE_ROLE: Role = Role::Admin;

    async fn insert(pool: &PgPool, request: SubmitAdmissionRequest, _actor: Option<Uuid>) -> Result<AdmissionApplication> {
        let sql = format!(
            r#"
            INSERT INTO admission_applications (id, reference, child_first_name, child_last_name, child_date_of_birth, program, preferred_start_date, parent_name, parent_email, parent_phone, address, notes, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING {}
            "#,
            ADMISSION_COLUMNS
        );

        let mut last_error = None;
        for _ in 0..REFERENCE_ATTEMPTS {
            let now = Utc::now();
            let result = sqlx::query_as::<_, AdmissionApplication>(&sql)
                .bind(Uuid::new_v4())
                .bind(generate_reference("ADM", now))
                .bind(request.child_first_name.trim())
                .bind(request.child_last_name.trim())
                .bind(request.child_date_of_birth)
                .bind(request.program.as_str())
                .bind(request.preferred_start_date)
                .bind(request.parent_name.trim())
                .bind(request.parent_email.trim().to_lowercase())
                .bind(request.parent_phone.trim())
                .bind(request.address.as_deref())
                .bind(request.notes.as_deref())
                .bind(AdmissionStatus::Pending.as_str())
                .bind(now)
                .fetch_one(pool)
                .await;

            match result {
                Ok(application) => return Ok(application),
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    last_error = Some(sqlx::Error::Database(db));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_error
            .map(BrightStartError::from)
            .unwrap_or_else(|| BrightStartError::Conflict("could not allocate a reference".to_string())))
    }

    async fn update(pool: &PgPool, id: Uuid, request: ReviewAdmissionRequest, actor: Option<Uuid>) -> Result<AdmissionApplication> {
        let current: String = sqlx::query_scalar("SELECT status FROM admission_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| BrightStartError::not_found("admission application", id))?;
        let current: AdmissionStatus = current.parse()?;

        let next = match request.status {
            Some(next) if next != current => {
                if !current.can_transition_to(next) {
                    return Err(BrightStartError::InvalidStateTransition {
                        from: current.to_string(),
                        to: next.to_string(),
                    });
                }
                Some(next)
            }
            _ => None,
        };

        let now = Utc::now();
        let application = sqlx::query_as::<_, AdmissionApplication>(&format!(
            r#"
            UPDATE admission_applications
            SET status = COALESCE($3, status),
                admin_notes = COALESCE($4, admin_notes),
                reviewed_by = CASE WHEN $3::text IS NULL THEN reviewed_by ELSE $5 END,
                reviewed_at = CASE WHEN $3::text IS NULL THEN reviewed_at ELSE $6 END,
                updated_at = $6
            WHERE id = $1 AND status = $2
            RETURNING {}
            "#,
            ADMISSION_COLUMNS
        ))
        .bind(id)
        .bind(current.as_str())
        .bind(next.map(|s| s.as_str()))
        .bind(request.admin_notes)
        .bind(actor)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        application.ok_or_else(|| {
            BrightStartError::Conflict("application status changed concurrently; reload and retry".to_string())
        })
    }
}
