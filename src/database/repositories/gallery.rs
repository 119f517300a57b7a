//! Gallery repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::{CrudRepository, Entity};
use crate::models::gallery::{GalleryItem, CreateGalleryItemRequest, UpdateGalleryItemRequest, DEFAULT_GALLERY_CATEGORY};
use crate::models::listing::{ListQuery, SortOrder};
use crate::utils::errors::Result;

const GALLERY_COLUMNS: &str = "id, title, description, image_url, category, display_order, is_published, created_at, updated_at";

#[async_trait]
impl Entity for GalleryItem {
    type Create = CreateGalleryItemRequest;
    type Update = UpdateGalleryItemRequest;

    const NAME: &'static str = "gallery item";
    const TABLE: &'static str = "gallery_items";
    const COLUMNS: &'static str = GALLERY_COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description"];
    const FILTER_COLUMNS: &'static [&'static str] = &["category"];
    const SORT_COLUMNS: &'static [&'static str] = &["created_at", "display_order", "title"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("created_at", SortOrder::Desc);
    const VISIBILITY_COLUMN: Option<&'static str> = Some("is_published");

    async fn insert(pool: &PgPool, request: CreateGalleryItemRequest, _actor: Option<Uuid>) -> Result<GalleryItem> {
        let item = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            INSERT INTO gallery_items (id, title, description, image_url, category, display_order, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {}
            "#,
            GALLERY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.image_url)
        .bind(request.category.unwrap_or_else(|| DEFAULT_GALLERY_CATEGORY.to_string()))
        .bind(request.display_order.unwrap_or(0))
        .bind(request.is_published.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    async fn update(pool: &PgPool, id: Uuid, request: UpdateGalleryItemRequest, _actor: Option<Uuid>) -> Result<GalleryItem> {
        let item = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            UPDATE gallery_items
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                category = COALESCE($5, category),
                display_order = COALESCE($6, display_order),
                is_published = COALESCE($7, is_published),
                updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            GALLERY_COLUMNS
        ))
        .bind(id)
        .bind(request.title.map(|t| t.trim().to_string()))
        .bind(request.description)
        .bind(request.image_url)
        .bind(request.category)
        .bind(request.display_order)
        .bind(request.is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(item)
    }
}

impl CrudRepository<GalleryItem> {
    /// Newest published images
    pub async fn recent(&self, limit: u32) -> Result<Vec<GalleryItem>> {
        Ok(self.get_all(&ListQuery::first(limit), true).await?.items)
    }
}
