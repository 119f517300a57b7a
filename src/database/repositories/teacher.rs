//! Teacher repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::{resolve_slug, unique_slug, Entity};
use crate::models::listing::SortOrder;
use crate::models::teacher::{Teacher, CreateTeacherRequest, UpdateTeacherRequest};
use crate::utils::errors::Result;

const TEACHER_COLUMNS: &str = "id, slug, full_name, position, bio, qualifications, email, photo_url, display_order, is_active, created_at, updated_at";

#[async_trait]
impl Entity for Teacher {
    type Create = CreateTeacherRequest;
    type Update = UpdateTeacherRequest;

    const NAME: &'static str = "teacher";
    const TABLE: &'static str = "teachers";
    const COLUMNS: &'static str = TEACHER_COLUMNS;
    const SLUG_COLUMN: Option<&'static str> = Some("slug");
    const SEARCH_COLUMNS: &'static [&'static str] = &["full_name", "position", "bio"];
    const SORT_COLUMNS: &'static [&'static str] = &["display_order", "full_name", "position", "created_at"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("display_order", SortOrder::Asc);
    const VISIBILITY_COLUMN: Option<&'static str> = Some("is_active");

    async fn insert(pool: &PgPool, request: CreateTeacherRequest, _actor: Option<Uuid>) -> Result<Teacher> {
        let slug = match resolve_slug::<Teacher>(pool, request.slug.as_deref(), None).await? {
            Some(slug) => slug,
            None => unique_slug::<Teacher>(pool, &request.full_name, None).await?,
        };

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            INSERT INTO teachers (id, slug, full_name, position, bio, qualifications, email, photo_url, display_order, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            TEACHER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(request.full_name.trim())
        .bind(request.position.trim())
        .bind(request.bio)
        .bind(request.qualifications)
        .bind(request.email)
        .bind(request.photo_url)
        .bind(request.display_order.unwrap_or(0))
        .bind(request.is_active.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(teacher)
    }

    async fn update(pool: &PgPool, id: Uuid, request: UpdateTeacherRequest, _actor: Option<Uuid>) -> Result<Teacher> {
        let slug = resolve_slug::<Teacher>(pool, request.slug.as_deref(), Some(id)).await?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            UPDATE teachers
            SET full_name = COALESCE($2, full_name),
                slug = COALESCE($3, slug),
                position = COALESCE($4, position),
                bio = COALESCE($5, bio),
                qualifications = COALESCE($6, qualifications),
                email = COALESCE($7, email),
                photo_url = COALESCE($8, photo_url),
                display_order = COALESCE($9, display_order),
                is_active = COALESCE($10, is_active),
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            TEACHER_COLUMNS
        ))
        .bind(id)
        .bind(request.full_name.map(|n| n.trim().to_string()))
        .bind(slug)
        .bind(request.position.map(|p| p.trim().to_string()))
        .bind(request.bio)
        .bind(request.qualifications)
        .bind(request.email)
        .bind(request.photo_url)
        .bind(request.display_order)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(teacher)
    }
}
