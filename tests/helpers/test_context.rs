//! Test context for unified test setup
//!
//! Builds the full router around test settings. Without a database the pool
//! is created lazily against an unreachable address, so everything that is
//! decided before the first query (auth, roles, validation) can be tested.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use BrightStart::config::{DatabaseConfig, Settings};
use BrightStart::database::create_lazy_pool;
use BrightStart::models::{Role, User};
use BrightStart::{build_router, AppState};

use super::database_helper::TestDatabase;
use super::test_data::staff_user;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

/// Response pieces a test cares about
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Router plus the state and temporary directories behind it
pub struct TestContext {
    pub state: AppState,
    pub router: Router,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Context without a reachable database
    pub fn new() -> Self {
        Self::with_settings(Self::test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = Self::with_temp_paths(settings, &temp_dir);
        let pool = create_lazy_pool(&settings.database).expect("Failed to create lazy pool");
        Self::build(settings, pool, temp_dir)
    }

    /// Context backed by the test database
    pub fn with_database(db: &TestDatabase) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut settings = Self::with_temp_paths(Self::test_settings(), &temp_dir);
        settings.database.url = db.database_url.clone();
        Self::build(settings, db.pool.clone(), temp_dir)
    }

    fn build(settings: Settings, pool: sqlx::PgPool, temp_dir: TempDir) -> Self {
        let state = AppState::new(settings, pool);
        let router = build_router(state.clone());
        Self { state, router, temp_dir }
    }

    /// Settings suitable for tests
    pub fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        settings.auth.secure_cookie = false;
        settings.auth.login_attempts_per_minute = 100;
        settings.database = DatabaseConfig {
            url: "postgresql://nobody@127.0.0.1:1/brightstart_test".to_string(),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            run_migrations: false,
        };
        settings.uploads.max_file_size_bytes = 64 * 1024;
        settings
    }

    /// Point uploads and the static site at the temp dir and seed the static files
    fn with_temp_paths(mut settings: Settings, temp_dir: &TempDir) -> Settings {
        let uploads = temp_dir.path().join("uploads");
        let site = temp_dir.path().join("site");
        std::fs::create_dir_all(&uploads).expect("Failed to create uploads dir");
        std::fs::create_dir_all(site.join("admin")).expect("Failed to create site dir");
        std::fs::write(site.join("index.html"), "<h1>BrightStart</h1>").expect("Failed to write index");
        std::fs::write(site.join("admin").join("index.html"), "<h1>Admin</h1>").expect("Failed to write admin index");

        settings.uploads.dir = uploads.to_string_lossy().to_string();
        settings.server.static_dir = Some(site.to_string_lossy().to_string());
        settings
    }

    /// Signed session token for an in-memory user
    pub fn token_for(&self, user: &User) -> String {
        self.state
            .services
            .auth_service
            .issue_token(user)
            .expect("Failed to issue token")
            .token
    }

    /// Token for a freshly generated user with `role`, plus that user
    pub fn staff_token(&self, role: Role) -> (User, String) {
        let user = staff_user(role);
        let token = self.token_for(&user);
        (user, token)
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };

        TestResponse { status, headers, body }
    }

    /// JSON request with an optional bearer token
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), token).await
    }

    pub async fn patch(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body), token).await
    }

    pub async fn put(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, None, token).await
    }
}
