//! Unified error handling for the API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use skills_core::{StoreError, UpdateError};

/// API error response body
#[derive(Serialize)]
pub struct ApiError {
    pub status: &'static str,
    pub message: String,
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                // Full detail stays in the log; clients get a generic message
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ApiError {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(msg) => AppError::BadRequest(msg),
            StoreError::NotFound(_) => AppError::NotFound("Skill not found".to_string()),
            StoreError::AlreadyExists(_) => AppError::Conflict("Skill already exists".to_string()),
            StoreError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<UpdateError> for AppError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Store(err) => err.into(),
            reread @ UpdateError::RereadFailed { .. } => AppError::Internal(reread.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", err.body_text());
        AppError::BadRequest("Invalid request payload".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (StoreError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (StoreError::NotFound("go".into()), StatusCode::NOT_FOUND),
            (StoreError::AlreadyExists("go".into()), StatusCode::CONFLICT),
            (
                StoreError::Internal("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn reread_failure_is_internal_not_missing() {
        let err = UpdateError::RereadFailed {
            key: "go".to_string(),
            source: StoreError::NotFound("go".to_string()),
        };
        assert_eq!(
            AppError::from(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
