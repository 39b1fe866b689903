use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::quiz::QuizError;
use crate::store::StoreError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Catalog(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Quiz(QuizError::UnknownCategory(_) | QuizError::UnknownOption { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::Quiz(
                QuizError::WrongStage { .. }
                | QuizError::AlreadyAnswered(_)
                | QuizError::AlreadyCompleted
                | QuizError::NotCompleted(_),
            ) => StatusCode::CONFLICT,
            Self::Quiz(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::Quiz(QuizError::Incomplete { .. }) => "INCOMPLETE_CATEGORY",
            Self::Quiz(QuizError::WrongStage { .. }) => "WRONG_STAGE",
            Self::Quiz(QuizError::NotCompleted(_)) => "QUIZ_NOT_COMPLETED",
            Self::Quiz(_) => "QUIZ_ERROR",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };

        // Try to serialize as msgpack, fall back to JSON
        if let Ok(bytes) = rmp_serde::to_vec_named(&body) {
            (status, [("content-type", "application/msgpack")], bytes).into_response()
        } else {
            let json = serde_json::to_string(&body).unwrap_or_else(|_| {
                r#"{"error":{"code":"SERIALIZATION_ERROR","message":"Failed to serialize error"}}"#.to_string()
            });
            (status, [("content-type", "application/json")], json).into_response()
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
