//! Authentication data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub provider: String,
    #[serde(skip_serializing)]
    pub provider_id: String,
    pub created_at: Option<String>,
}

/// Fields needed to provision a user on first sign-up
#[derive(Debug, Clone)]
pub struct NewUser {
    pub provider_subject_id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<ProviderClaims> for NewUser {
    fn from(claims: ProviderClaims) -> Self {
        Self {
            provider_subject_id: claims.subject_id,
            email: claims.email,
            name: claims.display_name,
            avatar: claims.avatar_url,
        }
    }
}

/// Verified identity attributes returned by Google
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderClaims {
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Signed session token handed back to the client
#[derive(Debug, Clone, Serialize)]
pub struct SessionCredential {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful sign-up or sign-in
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub credential: SessionCredential,
    pub user: User,
}

/// Google ID token payload for sign-up and sign-in
#[derive(Deserialize, Debug, Default)]
pub struct GoogleIdTokenPayload {
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Body returned by sign-up and sign-in
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            token: outcome.credential.token,
            expires_at: outcome.credential.expires_at,
            user: outcome.user,
        }
    }
}
