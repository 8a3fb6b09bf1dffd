//! API error types and their HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::error::RegistryError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "No receipt found for that id";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Request shape or format is wrong; the caller can fix and resend
    #[error("validation failed: {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("no receipt found for id {0}")]
    ReceiptNotFound(String),

    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("rate limit exceeded for {0}")]
    RateLimited(String),

    /// Anything the core could not handle; detail is logged, never returned
    #[error(transparent)]
    Internal(RegistryError),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => ApiError::ReceiptNotFound(id),
            other => ApiError::Internal(other),
        }
    }
}

/// `{ "errors": [...] }`
#[derive(Serialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<ValidationError>,
}

/// `{ "error": "..." }`
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    fn new(message: &str) -> Self {
        ErrorBody {
            error: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors })).into_response()
            }
            ApiError::ReceiptNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND_MESSAGE))).into_response()
            }
            ApiError::RouteNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))).into_response()
            }
            ApiError::RateLimited(_) => {
                (StatusCode::TOO_MANY_REQUESTS, Json(ErrorBody::new(RATE_LIMITED_MESSAGE))).into_response()
            }
            ApiError::Internal(err) => {
                error!(error = %err, "request failed inside the receipt core");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(INTERNAL_MESSAGE))).into_response()
            }
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PointsError;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_registry_error_mapping() {
        let not_found: ApiError = RegistryError::NotFound("abc".to_string()).into();
        assert!(matches!(not_found, ApiError::ReceiptNotFound(ref id) if id == "abc"));

        let collision: ApiError = RegistryError::IdCollision("abc".to_string()).into();
        assert!(matches!(collision, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err: ApiError = RegistryError::Points(PointsError::structural("purchaseDate", "secret detail")).into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], INTERNAL_MESSAGE);
        assert!(!json.to_string().contains("secret detail"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::ReceiptNotFound("abc".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_body_lists_errors() {
        let errors = vec![ValidationError::body("total", "total must be in the format 0.00", None)];
        let response = ApiError::Validation(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["path"], "total");
    }
}
