//! Event repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::{resolve_slug, unique_slug, CrudRepository, Entity};
use crate::models::event::{Event, CreateEventRequest, UpdateEventRequest, DEFAULT_EVENT_CATEGORY};
use crate::models::listing::{ListQuery, SortOrder};
use crate::utils::errors::{BrightStartError, Result};

const EVENT_COLUMNS: &str = "id, slug, title, description, location, category, starts_at, ends_at, image_url, is_published, created_by, created_at, updated_at";

#[async_trait]
impl Entity for Event {
    type Create = CreateEventRequest;
    type Update = UpdateEventRequest;

    const NAME: &'static str = "event";
    const TABLE: &'static str = "events";
    const COLUMNS: &'static str = EVENT_COLUMNS;
    const SLUG_COLUMN: Option<&'static str> = Some("slug");
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "location"];
    const FILTER_COLUMNS: &'static [&'static str] = &["category"];
    const SORT_COLUMNS: &'static [&'static str] = &["starts_at", "title", "created_at"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("starts_at", SortOrder::Asc);
    const VISIBILITY_COLUMN: Option<&'static str> = Some("is_published");
    const DATE_COLUMN: Option<&'static str> = Some("starts_at");

    async fn insert(pool: &PgPool, request: CreateEventRequest, actor: Option<Uuid>) -> Result<Event> {
        let slug = match resolve_slug::<Event>(pool, request.slug.as_deref(), None).await? {
            Some(slug) => slug,
            None => unique_slug::<Event>(pool, &request.title, None).await?,
        };

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, slug, title, description, location, category, starts_at, ends_at, image_url, is_published, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.location)
        .bind(request.category.unwrap_or_else(|| DEFAULT_EVENT_CATEGORY.to_string()))
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.image_url)
        .bind(request.is_published.unwrap_or(false))
        .bind(actor)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    async fn update(pool: &PgPool, id: Uuid, request: UpdateEventRequest, _actor: Option<Uuid>) -> Result<Event> {
        let current = sqlx::query_as::<_, Event>(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| BrightStartError::not_found("event", id))?;
        request.check_against(&current)?;

        let slug = resolve_slug::<Event>(pool, request.slug.as_deref(), Some(id)).await?;

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                starts_at = COALESCE($7, starts_at),
                ends_at = COALESCE($8, ends_at),
                image_url = COALESCE($9, image_url),
                is_published = COALESCE($10, is_published),
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(request.title.map(|t| t.trim().to_string()))
        .bind(slug)
        .bind(request.description)
        .bind(request.location)
        .bind(request.category)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.image_url)
        .bind(request.is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(event)
    }
}

impl CrudRepository<Event> {
    /// Next published events, soonest first
    pub async fn upcoming(&self, limit: u32) -> Result<Vec<Event>> {
        let query = ListQuery {
            upcoming: Some(true),
            ..ListQuery::first(limit)
        };
        Ok(self.get_all(&query, true).await?.items)
    }
}
