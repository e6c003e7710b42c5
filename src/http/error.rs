//! API error taxonomy.
//!
//! Each variant carries a fixed HTTP status. A missing record reports 400,
//! not 404; the published API always has and clients depend on it.
//! Server-side failures are logged with their source and reach the wire
//! with a stable message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::query::QueryError;
use crate::store::StoreError;
use crate::validator::FieldViolation;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload failed validation; rendered with the dedicated shape below.
    #[error("Validation error")]
    Validation(Vec<FieldViolation>),

    #[error("id not available")]
    MissingId,

    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("{0}")]
    InvalidQuery(#[from] QueryError),

    #[error("Comic book not found")]
    NotFound,

    #[error("persistence failure")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingId => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// General error body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
    success: bool,
}

/// Validation error body. Note the `status` key: this shape predates the
/// general envelope and clients match on it.
#[derive(Debug, Serialize)]
struct ValidationBody {
    status: u16,
    message: &'static str,
    errors: Vec<FieldViolation>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            match &self {
                ApiError::Store(source) => error!(error = %source, "store operation failed"),
                other => error!(error = %other, "request failed"),
            }
        }

        match self {
            ApiError::Validation(violations) => (
                status,
                Json(ValidationBody {
                    status: status.as_u16(),
                    message: "Validation error",
                    errors: violations,
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorBody {
                    status_code: status.as_u16(),
                    message: other.to_string(),
                    success: false,
                }),
            )
                .into_response(),
        }
    }
}
