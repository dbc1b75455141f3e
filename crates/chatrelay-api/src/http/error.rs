//! Application error type mapping to HTTP status codes.
//!
//! The body shape matches the failure payload convention used everywhere
//! else in the service: `{"error": CODE, "message": ...}`. Session
//! precondition faults arrive here as `SessionError` and surface as 4xx --
//! they are deliberate hard stops, not completion failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::SessionError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// No session with the given id.
    SessionNotFound,
    /// Transcript precondition violation.
    Session(SessionError),
    /// Request validation error.
    Validation(String),
    /// Webhook signature rejected.
    Unauthorized(String),
    /// Generic internal error.
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Session(e @ SessionError::UnknownMessage(_)) => {
                (StatusCode::NOT_FOUND, "MESSAGE_NOT_FOUND", e.to_string())
            }
            AppError::Session(e @ SessionError::MissingResponse(_)) => {
                (StatusCode::CONFLICT, "MISSING_RESPONSE", e.to_string())
            }
            AppError::Session(e @ SessionError::DuplicateMessage(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_MESSAGE", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::SessionNotFound, StatusCode::NOT_FOUND),
            (
                AppError::Session(SessionError::UnknownMessage(1)),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Session(SessionError::MissingResponse(1)),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("no".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
