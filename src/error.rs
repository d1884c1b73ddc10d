use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::store::StoreError;

/// Request-level failure. Every variant maps to a status code and renders
/// as `{"error": "<message>"}`; store/internal detail stays in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    InvalidId(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Email already in use")]
    Conflict,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 500 with a generic client message; the cause goes to the log only.
    pub fn internal<E: std::fmt::Display>(msg: &'static str, err: E) -> Self {
        tracing::error!(error = %err, "{msg}");
        ApiError::Internal(msg)
    }

    pub fn from_store(err: StoreError, msg: &'static str) -> Self {
        match err {
            StoreError::Conflict => ApiError::Conflict,
            other => ApiError::internal(msg, other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
