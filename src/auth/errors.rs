//! Authentication error taxonomy

use thiserror::Error;

/// Outcomes of the authentication flows that callers must tell apart.
///
/// Every named kind maps to a fixed transport status in
/// [`crate::common::ApiError`]; `Fault` carries anything unclassified and is
/// forwarded to the generic error path unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication token is required")]
    MissingCredential,

    #[error("invalid authentication token")]
    InvalidCredential,

    #[error("authentication token has expired")]
    ExpiredCredential,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("processing failure: {0}")]
    ProcessingFailure(String),

    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}
