//! Middleware module
//! 
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{admin_page_guard, require_auth, CurrentUser};
pub use logging::request_logging;
pub use rate_limit::LoginRateLimiter;
