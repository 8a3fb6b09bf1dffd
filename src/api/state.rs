//! Application state shared across handlers

use crate::api::middleware::RateLimiter;
use crate::config::RateLimitConfig;
use crate::registry::ReceiptRegistry;

/// Cheap to clone; every clone shares the same registry and limiter
#[derive(Clone)]
pub struct AppState {
    pub registry: ReceiptRegistry,
    pub limiter: RateLimiter,
    pub version: String,
}

impl AppState {
    pub fn new(registry: ReceiptRegistry, rate_limit: RateLimitConfig) -> Self {
        Self {
            registry,
            limiter: RateLimiter::new(rate_limit),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReceiptRegistry::new(), RateLimitConfig::default())
    }
}
