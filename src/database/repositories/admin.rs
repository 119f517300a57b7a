//! Admin repository implementation: site settings and dashboard counts

use std::collections::BTreeMap;

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::models::admin::{SiteSetting, UpsertSettingRequest};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or replace a setting
    pub async fn upsert_setting(&self, key: &str, request: UpsertSettingRequest, updated_by: Option<Uuid>) -> Result<SiteSetting> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            r#"
            INSERT INTO site_settings (key, value, is_public, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (key)
            DO UPDATE SET
                value = EXCLUDED.value,
                is_public = EXCLUDED.is_public,
                updated_by = EXCLUDED.updated_by,
                updated_at = EXCLUDED.updated_at
            RETURNING key, value, is_public, updated_by, updated_at
            "#
        )
        .bind(key)
        .bind(request.value)
        .bind(request.is_public)
        .bind(updated_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }

    /// Delete a setting
    pub async fn delete_setting(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM site_settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all settings
    pub async fn list_settings(&self) -> Result<Vec<SiteSetting>> {
        let settings = sqlx::query_as::<_, SiteSetting>(
            "SELECT key, value, is_public, updated_by, updated_at FROM site_settings ORDER BY key ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Public settings as a key → value map
    pub async fn public_settings(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        let rows: Vec<(String, serde_json::Value)> = sqlx::query_as(
            "SELECT key, value FROM site_settings WHERE is_public = TRUE ORDER BY key ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Total times any download has been fetched
    pub async fn total_downloads(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(download_count), 0)::BIGINT FROM downloads")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
