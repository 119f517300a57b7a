//! Rate limiting middleware
//!
//! Login attempts are limited per email address so a single account cannot
//! be brute forced, whatever address the requests come from.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{debug, warn};

use crate::utils::errors::{BrightStartError, Result};

/// Keys kept before idle entries are pruned
const MAX_TRACKED_KEYS: usize = 10_000;

/// Keyed limiter for login attempts
#[derive(Clone)]
pub struct LoginRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl LoginRateLimiter {
    /// Create a limiter allowing `attempts_per_minute` per key
    pub fn new(attempts_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
        }
    }

    /// Count one attempt for `email`; fails once the quota is used up
    pub fn check(&self, email: &str) -> Result<()> {
        if self.limiter.len() > MAX_TRACKED_KEYS {
            self.limiter.retain_recent();
        }

        let key = email.trim().to_lowercase();
        match self.limiter.check_key(&key) {
            Ok(()) => {
                debug!(email = %key, "Login rate limit check passed");
                Ok(())
            }
            Err(_) => {
                warn!(email = %key, "Login rate limit exceeded");
                Err(BrightStartError::RateLimitExceeded)
            }
        }
    }
}
