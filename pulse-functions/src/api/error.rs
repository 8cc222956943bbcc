//! API Error Handling
//!
//! Unified error type and conversion for plain-text responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::EmptyCommitError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, format!("{}\n", message)).into_response()
    }
}

// Every workflow failure is a 500; the kind only matters for logs.
impl From<EmptyCommitError> for ApiError {
    fn from(err: EmptyCommitError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
