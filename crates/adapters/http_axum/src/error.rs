//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use widgethub_domain::error::{ValidationError, WidgetHubError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors a handler can return, each mapped to one HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the application or domain layer.
    Domain(WidgetHubError),
    /// A conditional endpoint was called without `If-Match`.
    PreconditionRequired,
}

impl From<WidgetHubError> for ApiError {
    fn from(err: WidgetHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::PreconditionRequired => (
                StatusCode::PRECONDITION_REQUIRED,
                "If-Match header is required".to_string(),
            ),
            Self::Domain(WidgetHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(WidgetHubError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(WidgetHubError::Conflict(err)) => (StatusCode::CONFLICT, err.to_string()),
            Self::Domain(WidgetHubError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
