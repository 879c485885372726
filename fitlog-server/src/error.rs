//! HTTP error responses
//!
//! 4xx errors carry `{"error": message}`; 500s add `"details"` with the
//! underlying failure so the client can show it.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {details}")]
    Internal { message: String, details: String },
}

impl ApiError {
    /// Log a failure and wrap it as a 500 with a generic message
    pub fn internal(message: &str, err: impl std::fmt::Display) -> Self {
        error!("{}: {}", message, err);
        ApiError::Internal {
            message: message.to_string(),
            details: err.to_string(),
        }
    }

    /// Session missing, unknown or expired
    pub fn no_user() -> Self {
        ApiError::BadRequest("No user found. Please sign in first.".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Internal { message, details } => json!({
                "error": message,
                "details": details,
            }),
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message) => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
