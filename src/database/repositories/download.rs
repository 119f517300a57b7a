//! Download repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::database::repositories::crud::{CrudRepository, Entity};
use crate::models::download::{Download, CreateDownloadRequest, UpdateDownloadRequest, DEFAULT_DOWNLOAD_CATEGORY};
use crate::models::listing::SortOrder;
use crate::utils::errors::Result;

const DOWNLOAD_COLUMNS: &str = "id, title, description, file_url, file_name, file_size, category, is_published, download_count, created_at, updated_at";

#[async_trait]
impl Entity for Download {
    type Create = CreateDownloadRequest;
    type Update = UpdateDownloadRequest;

    const NAME: &'static str = "download";
    const TABLE: &'static str = "downloads";
    const COLUMNS: &'static str = DOWNLOAD_COLUMNS;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "file_name"];
    const FILTER_COLUMNS: &'static [&'static str] = &["category"];
    const SORT_COLUMNS: &'static [&'static str] = &["created_at", "title", "download_count"];
    const DEFAULT_SORT: (&'static str, SortOrder) = ("created_at", SortOrder::Desc);
    const VISIBILITY_COLUMN: Option<&'static str> = Some("is_published");

    async fn insert(pool: &PgPool, request: CreateDownloadRequest, _actor: Option<Uuid>) -> Result<Download> {
        let file_name = request.resolved_file_name();

        let download = sqlx::query_as::<_, Download>(&format!(
            r#"
            INSERT INTO downloads (id, title, description, file_url, file_name, file_size, category, is_published, download_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $9)
            RETURNING {}
            "#,
            DOWNLOAD_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.file_url)
        .bind(file_name)
        .bind(request.file_size)
        .bind(request.category.unwrap_or_else(|| DEFAULT_DOWNLOAD_CATEGORY.to_string()))
        .bind(request.is_published.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(download)
    }

    async fn update(pool: &PgPool, id: Uuid, request: UpdateDownloadRequest, _actor: Option<Uuid>) -> Result<Download> {
        let download = sqlx::query_as::<_, Download>(&format!(
            r#"
            UPDATE downloads
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                file_url = COALESCE($4, file_url),
                file_name = COALESCE($5, file_name),
                file_size = COALESCE($6, file_size),
                category = COALESCE($7, category),
                is_published = COALESCE($8, is_published),
                updated_at = $9
            WHERE id = $1
            RETURNING {}
            "#,
            DOWNLOAD_COLUMNS
        ))
        .bind(id)
        .bind(request.title.map(|t| t.trim().to_string()))
        .bind(request.description)
        .bind(request.file_url)
        .bind(request.file_name)
        .bind(request.file_size)
        .bind(request.category)
        .bind(request.is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(download)
    }
}

impl CrudRepository<Download> {
    /// Count a public download and return the file location
    pub async fn record_download(&self, id: Uuid) -> Result<Option<String>> {
        let file_url: Option<String> = sqlx::query_scalar(
            "UPDATE downloads SET download_count = download_count + 1 WHERE id = $1 AND is_published = TRUE RETURNING file_url"
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(file_url)
    }
}
