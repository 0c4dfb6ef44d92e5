// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::players::PlayerError;
use crate::services::telegram_auth::AuthError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server misconfigured: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Client-facing message for a body that failed to decode.
    pub const INVALID_JSON: &'static str = "Invalid JSON";

    pub fn invalid_json() -> Self {
        AppError::BadRequest(Self::INVALID_JSON.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let msg = err.to_string();
        match err {
            AuthError::MalformedAssertion => AppError::BadRequest(msg),
            AuthError::SignatureMismatch => AppError::Unauthorized(msg),
            AuthError::NotConfigured => AppError::Configuration(msg),
        }
    }
}

impl From<PlayerError> for AppError {
    fn from(err: PlayerError) -> Self {
        let msg = err.to_string();
        match err {
            PlayerError::Validation(_) | PlayerError::NoFieldsToUpdate => {
                AppError::BadRequest(msg)
            }
            PlayerError::NotFound => AppError::NotFound(msg),
            PlayerError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
