//! Router setup

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::middleware::{rate_limit_middleware, with_security_headers};
use crate::api::state::AppState;

/// Build the application router.
///
/// Every response, including 429s, carries the security headers; the rate
/// limiter runs before any handler.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/receipts/process", post(handlers::process_receipt))
        .route("/receipts/:id/points", get(handlers::get_points))
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state);

    with_security_headers(router).layer(TraceLayer::new_for_http())
}
