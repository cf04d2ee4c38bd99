//! Sign-up, sign-in and logout orchestration

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::directory::UserDirectory;
use super::errors::AuthError;
use super::extractors::AuthedUser;
use super::models::{AuthOutcome, NewUser, ProviderClaims, User};
use super::session::SessionIssuer;
use super::verifier::IdentityVerifier;
use crate::common::safe_email_log;

/// Authentication flows over pluggable verifier, directory and issuer.
///
/// Sign-up never signs in an existing account and sign-in never provisions
/// one, so a provider identity can neither be duplicated nor taken over.
pub struct AuthService {
    verifier: Arc<dyn IdentityVerifier>,
    directory: Arc<dyn UserDirectory>,
    sessions: Arc<SessionIssuer>,
}

impl AuthService {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        directory: Arc<dyn UserDirectory>,
        sessions: Arc<SessionIssuer>,
    ) -> Self {
        Self {
            verifier,
            directory,
            sessions,
        }
    }

    pub async fn sign_up_with_google(
        &self,
        raw_token: Option<&str>,
    ) -> Result<AuthOutcome, AuthError> {
        let claims = self.verify_token(raw_token).await?;

        if self
            .directory
            .find_by_provider_subject_id(&claims.subject_id)
            .await?
            .is_some()
        {
            warn!(
                provider = "google",
                provider_id = %claims.subject_id,
                "Sign-up rejected: user already exists"
            );
            return Err(AuthError::UserAlreadyExists);
        }

        info!(
            email = %safe_email_log(&claims.email),
            provider = "google",
            provider_id = %claims.subject_id,
            "Creating new user account via Google sign-up"
        );
        let subject_id = claims.subject_id.clone();
        let user = match self.directory.create(NewUser::from(claims)).await {
            Ok(user) => user,
            // Lost a race with a concurrent sign-up for the same identity
            Err(e) if e.is_duplicate() => {
                warn!(
                    provider = "google",
                    provider_id = %subject_id,
                    "Sign-up rejected: user created concurrently"
                );
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        self.issue_for(user)
    }

    pub async fn sign_in_with_google(
        &self,
        raw_token: Option<&str>,
    ) -> Result<AuthOutcome, AuthError> {
        let claims = self.verify_token(raw_token).await?;

        let Some(user) = self
            .directory
            .find_by_provider_subject_id(&claims.subject_id)
            .await?
        else {
            warn!(
                provider = "google",
                provider_id = %claims.subject_id,
                "Sign-in rejected: no account for this Google identity"
            );
            return Err(AuthError::UserNotFound);
        };

        self.issue_for(user)
    }

    /// Sessions are stateless; the client discards its credential
    pub async fn logout(&self, user: &AuthedUser) -> Result<(), AuthError> {
        info!(user_id = %user.id, "User logout successful");
        Ok(())
    }

    async fn verify_token(&self, raw_token: Option<&str>) -> Result<ProviderClaims, AuthError> {
        let raw_token = raw_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                debug!("Google auth request without id_token");
                AuthError::MissingCredential
            })?;

        self.verifier.verify(raw_token).await
    }

    fn issue_for(&self, user: User) -> Result<AuthOutcome, AuthError> {
        let credential = self.sessions.issue(&user.id)?;

        info!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            provider = "google",
            expires_at = %credential.expires_at,
            "Session issued"
        );

        Ok(AuthOutcome { credential, user })
    }
}
