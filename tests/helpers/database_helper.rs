//! Test database helper utilities
//!
//! Database-backed tests run against `TEST_DATABASE_URL` when it is set and
//! against a throwaway PostgreSQL container otherwise. Setting
//! `BRIGHTSTART_SKIP_DB_TESTS` skips them explicitly.

use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres as PostgresImage;

/// Tables cleared between tests, children first
const TABLES: &[&str] = &[
    "site_settings",
    "admission_applications",
    "downloads",
    "gallery_items",
    "news_posts",
    "events",
    "teachers",
    "users",
];

/// Test database helper that manages PostgreSQL test database setup
pub struct TestDatabase {
    pub pool: PgPool,
    pub database_url: String,
    _container: Option<ContainerAsync<PostgresImage>>,
}

impl TestDatabase {
    /// Connect, migrate and clean a test database
    pub async fn new() -> Option<Self> {
        if std::env::var_os("BRIGHTSTART_SKIP_DB_TESTS").is_some() {
            eprintln!("BRIGHTSTART_SKIP_DB_TESTS set, skipping database test");
            return None;
        }

        let (database_url, container) = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) if !url.is_empty() => (url, None),
            _ => {
                let container = PostgresImage::default()
                    .with_db_name("brightstart_test")
                    .with_user("brightstart")
                    .with_password("brightstart")
                    .start()
                    .await
                    .expect("Failed to start postgres container");
                let host = container.get_host().await.expect("Failed to get container host");
                let port = container
                    .get_host_port_ipv4(5432)
                    .await
                    .expect("Failed to get container port");
                let url = format!("postgresql://brightstart:brightstart@{}:{}/brightstart_test", host, port);
                (url, Some(container))
            }
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let db = Self {
            pool,
            database_url,
            _container: container,
        };
        db.cleanup().await.expect("Failed to clean test database");
        Some(db)
    }

    /// Delete all rows from every table
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        for table in TABLES {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Count records in a table
    pub async fn count_records(&self, table: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
