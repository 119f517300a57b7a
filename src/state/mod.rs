//! Shared application state
//!
//! One `AppState` is built at startup and cloned into every request.

use std::sync::Arc;

use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::middleware::rate_limit::LoginRateLimiter;
use crate::services::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub login_limiter: LoginRateLimiter,
}

impl AppState {
    pub fn new(settings: Settings, pool: DatabasePool) -> Self {
        let db = DatabaseService::new(pool);
        let services = ServiceFactory::new(&settings, &db);
        let login_limiter = LoginRateLimiter::new(settings.auth.login_attempts_per_minute);

        Self {
            settings: Arc::new(settings),
            db,
            services,
            login_limiter,
        }
    }
}
