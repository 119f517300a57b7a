//! News post repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::{resolve_slug, unique_slug, CrudRepository, Entity};
use crate::models::listing::{ListQuery, SortOrder};
use crate::models::news::{NewsPost, CreateNewsRequest, UpdateNewsRequest};
use crate::utils::errors::Result;

const NEWS_COLUMNS: &str = "id, slug, title, excerpt, body, cover_image_url, is_published, published_at, author_id, created_at, updated_at";

#[async_trait]
impl Entity for NewsPost {
    type Create = CreateNewsRequest;
    type Update = UpdateNewsRequest;

    const NAME: &'static str = "news post";
    const TABLE: &'static str = "news_posts";
    const COLUMNS: &'static str = NEWS_COLUMNS;
    const SLUG_COLUMN: Option<&'static str> = Some("slug");
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "excerpt", "body"];
    const SORT_COLUMNS: &'static [&'static str] = &["published_at", "created_at", "title"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("published_at", SortOrder::Desc);
    const NULLABLE_SORT_COLUMNS: &'static [&'static str] = &["published_at"];
    const VISIBILITY_COLUMN: Option<&'static str> = Some("is_published");

    async fn insert(pool: &PgPool, request: CreateNewsRequest, actor: Option<Uuid>) -> Result<NewsPost> {
        let slug = match resolve_slug::<NewsPost>(pool, request.slug.as_deref(), None).await? {
            Some(slug) => slug,
            None => unique_slug::<NewsPost>(pool, &request.title, None).await?,
        };
        let now = Utc::now();
        let is_published = request.is_published.unwrap_or(false);

        let post = sqlx::query_as::<_, NewsPost>(&format!(
            r#"
            INSERT INTO news_posts (id, slug, title, excerpt, body, cover_image_url, is_published, published_at, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(request.title.trim())
        .bind(request.excerpt)
        .bind(request.body)
        .bind(request.cover_image_url)
        .bind(is_published)
        .bind(is_published.then_some(now))
        .bind(actor)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    async fn update(pool: &PgPool, id: Uuid, request: UpdateNewsRequest, _actor: Option<Uuid>) -> Result<NewsPost> {
        let slug = resolve_slug::<NewsPost>(pool, request.slug.as_deref(), Some(id)).await?;

        let post = sqlx::query_as::<_, NewsPost>(&format!(
            r#"
            UPDATE news_posts
            SET title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                body = COALESCE($5, body),
                cover_image_url = COALESCE($6, cover_image_url),
                is_published = COALESCE($7, is_published),
                published_at = CASE
                    WHEN COALESCE($7, is_published) AND published_at IS NULL THEN $8
                    ELSE published_at
                END,
                updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(id)
        .bind(request.title.map(|t| t.trim().to_string()))
        .bind(slug)
        .bind(request.excerpt)
        .bind(request.body)
        .bind(request.cover_image_url)
        .bind(request.is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(post)
    }
}

impl CrudRepository<NewsPost> {
    /// Most recently published posts
    pub async fn latest(&self, limit: u32) -> Result<Vec<NewsPost>> {
        Ok(self.get_all(&ListQuery::first(limit), true).await?.items)
    }
}
