//! Google ID token verification

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::errors::AuthError;
use super::models::ProviderClaims;
use crate::common::{safe_email_log, safe_token_log};

/// Validates an opaque client-supplied token with the identity provider.
///
/// Implementations call the provider exactly once per invocation and never
/// return partially populated claims.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, raw_token: &str) -> Result<ProviderClaims, AuthError>;
}

/// Verifies Google ID tokens against the `tokeninfo` endpoint
/// Docs: https://developers.google.com/identity/sign-in/web/backend-auth
pub struct GoogleTokenVerifier {
    http: Client,
    tokeninfo_url: String,
    client_id: Option<String>,
}

impl GoogleTokenVerifier {
    pub fn new(http: Client, tokeninfo_url: impl Into<String>, client_id: Option<String>) -> Self {
        Self {
            http,
            tokeninfo_url: tokeninfo_url.into(),
            client_id,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, raw_token: &str) -> Result<ProviderClaims, AuthError> {
        debug!(
            token = %safe_token_log(raw_token),
            "Initiating Google token validation with tokeninfo endpoint"
        );

        let resp = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", raw_token)])
            .send()
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    endpoint = %self.tokeninfo_url,
                    "HTTP error contacting Google tokeninfo endpoint"
                );
                AuthError::InvalidCredential
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(http_status = %status, "Google tokeninfo rejected the token");
            return Err(AuthError::InvalidCredential);
        }

        let body = resp.json::<Value>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Google tokeninfo JSON response");
            AuthError::InvalidCredential
        })?;

        let claims = claims_from_tokeninfo(&body, self.client_id.as_deref(), Utc::now().timestamp())?;

        debug!(
            email = %safe_email_log(&claims.email),
            provider = "google",
            provider_id = %claims.subject_id,
            "Google token validation successful"
        );

        Ok(claims)
    }
}

/// Extracts the required claims from a tokeninfo payload.
///
/// `sub`, `email` and `name` must all be present and non-empty; anything less
/// rejects the token as a whole.
pub fn claims_from_tokeninfo(
    body: &Value,
    expected_audience: Option<&str>,
    now: i64,
) -> Result<ProviderClaims, AuthError> {
    let Some(payload) = body.as_object() else {
        warn!("Google tokeninfo returned no claims object");
        return Err(AuthError::InvalidCredential);
    };

    let field = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let (Some(subject_id), Some(email), Some(display_name)) =
        (field("sub"), field("email"), field("name"))
    else {
        warn!(
            has_sub = field("sub").is_some(),
            has_email = field("email").is_some(),
            has_name = field("name").is_some(),
            "Google token missing required fields (sub/email/name)"
        );
        return Err(AuthError::InvalidCredential);
    };

    if let Some(client_id) = expected_audience {
        match field("aud") {
            Some(aud) if aud == client_id => {}
            Some(aud) => {
                warn!(
                    token_audience = %aud,
                    expected_client_id = %client_id,
                    "Google token audience validation failed - rejecting token"
                );
                return Err(AuthError::InvalidCredential);
            }
            None => {
                warn!(
                    expected_client_id = %client_id,
                    "Google token missing audience field - rejecting token"
                );
                return Err(AuthError::InvalidCredential);
            }
        }
    }

    // tokeninfo encodes numbers and booleans as strings
    if let Some(exp) = payload.get("exp").and_then(number_or_string) {
        if exp < now {
            warn!(token_exp = exp, current_time = now, "Google token has expired");
            return Err(AuthError::InvalidCredential);
        }
    }

    let email_verified = payload.get("email_verified").and_then(|v| match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse::<bool>().ok(),
        _ => None,
    });
    if email_verified == Some(false) {
        warn!(
            email = %safe_email_log(&email),
            "Google token contains unverified email address"
        );
    }

    Ok(ProviderClaims {
        subject_id,
        email,
        display_name,
        avatar_url: field("picture"),
    })
}

fn number_or_string(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
