//! Maps `AppError` to HTTP status codes and a uniform JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use launchline_core::error::AppError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper so handlers can return `Result<T, ApiError>` and get a JSON
/// error response for free via `IntoResponse`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) | AppError::CorruptArtifact(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::StorageUnavailable(_) | AppError::QueueUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InvalidState(_) | AppError::UnknownStage(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
