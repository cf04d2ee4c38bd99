// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use crate::auth::errors::AuthError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    ProcessingError(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
    /// Anything the domain layer could not classify; details are logged, not returned
    Unhandled(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ProcessingError(msg) => write!(f, "Processing Error: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::Unhandled(e) => write!(f, "Unhandled Error: {}", e),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            ApiError::ProcessingError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, "PROCESSING_ERROR")
            }
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::Unhandled(e) => {
                error!(error = ?e, "Unhandled error reached the generic error handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Controller-facing mapping of authentication outcomes to transport errors.
///
/// Named kinds get a stable message independent of provider text; unclassified
/// faults are forwarded to the generic handler untouched.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => {
                ApiError::BadRequest("authentication token is required".to_string())
            }
            AuthError::InvalidCredential => {
                ApiError::Unauthorized("invalid authentication token".to_string())
            }
            AuthError::ExpiredCredential => {
                ApiError::Unauthorized("authentication token has expired".to_string())
            }
            AuthError::UserAlreadyExists => {
                ApiError::Conflict("user already exists, please sign in".to_string())
            }
            AuthError::UserNotFound => {
                ApiError::NotFound("user not found, please sign up first".to_string())
            }
            AuthError::ProcessingFailure(detail) => {
                error!(detail = %detail, "Authentication processing failure");
                ApiError::ProcessingError("failed to process authentication".to_string())
            }
            AuthError::Fault(e) => ApiError::Unhandled(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AuthError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_auth_error_status_mapping() {
        assert_eq!(status_of(AuthError::MissingCredential), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AuthError::InvalidCredential), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AuthError::ExpiredCredential), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AuthError::UserAlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_of(AuthError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AuthError::ProcessingFailure("decode".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unclassified_fault_goes_to_generic_handler() {
        let api_err = ApiError::from(AuthError::Fault(anyhow::anyhow!("connection reset")));
        assert!(matches!(api_err, ApiError::Unhandled(_)));
        assert_eq!(
            api_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
