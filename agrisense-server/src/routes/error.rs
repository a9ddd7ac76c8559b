//! Structured failure responses
//!
//! Request-scoped core errors become `{ "error": kind, "message": text }`
//! bodies with an appropriate status code. Failures are logged here, at
//! the service boundary, and never crash the process.

use agrisense::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

/// Body of a structured failure response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Wrapper mapping core errors onto HTTP responses
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) | Error::ImageDecode(_) | Error::NoFileProvided => {
                StatusCode::BAD_REQUEST
            }
            Error::UnknownCrop(_) => StatusCode::NOT_FOUND,
            Error::ModelLoad(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        warn!(kind = self.0.kind(), "request failed: {}", self.0);

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
