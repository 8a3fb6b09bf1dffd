//! HTTP adapter: routes, handlers and middleware around the registry

mod error;
mod handlers;
mod middleware;
mod router;
mod server;
mod state;

pub use error::{ApiError, ApiResult};
pub use handlers::{HealthResponse, PointsResponse, ProcessResponse};
pub use middleware::RateLimiter;
pub use router::create_router;
pub use server::{build_app, run_server};
pub use state::AppState;
