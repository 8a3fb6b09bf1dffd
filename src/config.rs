//! Server configuration, from flags or environment

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "receipt-server")]
#[command(about = "Scores purchase receipts and serves their reward points")]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, env = "RECEIPT_POINTS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "RECEIPT_POINTS_PORT", default_value = "3000")]
    pub port: u16,

    /// Log filter (e.g. "info", "receipt_points=debug")
    #[arg(long, env = "RECEIPT_POINTS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Requests allowed per client within one rate-limit window
    #[arg(long, env = "RECEIPT_POINTS_RATE_LIMIT_MAX", default_value = "100")]
    pub rate_limit_max: usize,

    /// Length of the rate-limit window in seconds
    #[arg(long, env = "RECEIPT_POINTS_RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    pub rate_limit_window_secs: u64,

    /// Answer cross-origin requests from any origin
    #[arg(long, env = "RECEIPT_POINTS_CORS", default_value = "false")]
    pub cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.rate_limit_max,
            window: Duration::from_secs(self.rate_limit_window_secs),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let defaults = RateLimitConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            rate_limit_max: defaults.max_requests,
            rate_limit_window_secs: defaults.window.as_secs(),
            cors: false,
        }
    }
}

/// Fixed-window request limit per client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}
