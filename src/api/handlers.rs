//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::Uri,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::validation::{validate_receipt, validate_receipt_id, ValidationError, ID_REQUIRED};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub receipts: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Validate, score and store a receipt
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ProcessResponse>> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::Validation(vec![ValidationError::body(
            "body",
            &rejection.body_text(),
            None,
        )])
    })?;

    let receipt = validate_receipt(&body).map_err(ApiError::Validation)?;
    let id = state.registry.create(receipt)?;

    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Points awarded to a stored receipt
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let id = validate_receipt_id(&id).map_err(ApiError::Validation)?;
    let points = state.registry.get_points(id)?;

    Ok(Json(PointsResponse { points }))
}

/// GET /health - Health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
        receipts: state.registry.len(),
    })
}

/// Fallback for unmatched routes.
///
/// The router never matches an empty `:id` segment, so a points lookup with
/// no id lands here and is reported as a missing id rather than a missing route.
/// A trailing slash is tolerated.
pub async fn not_found(uri: Uri) -> ApiError {
    if uri.path().trim_end_matches('/') == "/receipts//points" {
        return ApiError::Validation(vec![ValidationError::param("id", ID_REQUIRED, "")]);
    }
    ApiError::RouteNotFound(uri.path().to_string())
}
