//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use tracing::error;

use crate::common::ApiError;

/// Authenticated user extractor
///
/// Reads the identity attached by [`super::gate::require_auth`]; handlers
/// using it must sit behind that middleware.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    /// Admitted through the test bypass rather than a session credential
    pub bypassed: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthedUser>().cloned().ok_or_else(|| {
            error!(uri = %parts.uri, "AuthedUser requested on a route without require_auth");
            ApiError::InternalServer("authentication gate not configured".to_string())
        })
    }
}
