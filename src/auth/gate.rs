//! Request-authentication gate for protected routes

use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::errors::AuthError;
use super::extractors::AuthedUser;
use super::session::SessionIssuer;
use crate::common::{dev_mode::DevModeConfig, ApiError, AppState};

const BEARER_PREFIX: &str = "Bearer ";

/// Decides whether a request carrying an `Authorization` value is admitted
pub struct AuthGate {
    sessions: Arc<SessionIssuer>,
    dev_mode: DevModeConfig,
}

impl AuthGate {
    pub fn new(sessions: Arc<SessionIssuer>, dev_mode: DevModeConfig) -> Self {
        Self { sessions, dev_mode }
    }

    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthedUser, AuthError> {
        // DEV MODE: only with both the flag and a test user configured
        if let Some(test_user_id) = self.dev_mode.bypass_user() {
            debug!(user_id = %test_user_id, "DEV MODE: Authentication bypassed");
            return Ok(AuthedUser {
                id: test_user_id.to_string(),
                bypassed: true,
            });
        }

        let Some(value) = authorization.map(str::trim).filter(|v| !v.is_empty()) else {
            warn!("Authentication failed: missing Authorization header");
            return Err(AuthError::MissingCredential);
        };

        let token = match value.strip_prefix(BEARER_PREFIX) {
            Some(rest) => rest.trim(),
            // "Bearer" with nothing after it (trimmed above)
            None if value == BEARER_PREFIX.trim_end() => "",
            None => {
                warn!("Authentication failed: Authorization header is not a bearer token");
                return Err(AuthError::InvalidCredential);
            }
        };

        if token.is_empty() {
            warn!("Authentication failed: empty bearer token");
            return Err(AuthError::MissingCredential);
        }

        let user_id = self.sessions.verify(token).map_err(|rejection| {
            warn!(rejection = ?rejection, "Session token rejected");
            AuthError::from(rejection)
        })?;

        debug!(user_id = %user_id, "User authentication successful");
        Ok(AuthedUser {
            id: user_id,
            bypassed: false,
        })
    }
}

/// Middleware guarding protected routes; attaches [`AuthedUser`] on success
pub async fn require_auth(
    Extension(state): Extension<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authed = {
        let authorization = match request.headers().get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Authentication failed: Authorization header is not valid ASCII");
                ApiError::from(AuthError::InvalidCredential)
            })?),
            None => None,
        };
        state.gate.authenticate(authorization)?
    };

    request.extensions_mut().insert(authed);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const SECRET: &str = "gate_test_secret_key_with_enough_len";

    fn gate(dev_mode: DevModeConfig) -> (AuthGate, Arc<SessionIssuer>) {
        let sessions = Arc::new(SessionIssuer::new(SECRET));
        (AuthGate::new(sessions.clone(), dev_mode), sessions)
    }

    #[test]
    fn test_missing_header_is_missing_credential() {
        let (gate, _) = gate(DevModeConfig::default());
        assert!(matches!(
            gate.authenticate(None),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            gate.authenticate(Some("  ")),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            gate.authenticate(Some("Bearer ")),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn test_valid_bearer_token_is_admitted() {
        let (gate, sessions) = gate(DevModeConfig::default());
        let credential = sessions.issue("U_VALID").unwrap();

        let authed = gate
            .authenticate(Some(&format!("Bearer {}", credential.token)))
            .unwrap();
        assert_eq!(authed.id, "U_VALID");
        assert!(!authed.bypassed);
    }

    #[test]
    fn test_malformed_token_is_invalid_credential() {
        let (gate, _) = gate(DevModeConfig::default());
        assert!(matches!(
            gate.authenticate(Some("Bearer not.a.jwt")),
            Err(AuthError::InvalidCredential)
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_invalid_credential() {
        let (gate, sessions) = gate(DevModeConfig::default());
        let credential = sessions.issue("U_VALID").unwrap();
        assert!(matches!(
            gate.authenticate(Some(&credential.token)),
            Err(AuthError::InvalidCredential)
        ));
        assert!(matches!(
            gate.authenticate(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidCredential)
        ));
    }

    #[test]
    fn test_past_expiry_is_expired_credential() {
        let (gate, sessions) = gate(DevModeConfig::default());
        let credential = sessions
            .issue_at("U_OLD", Utc::now() - Duration::hours(19) - Duration::seconds(5))
            .unwrap();

        assert!(matches!(
            gate.authenticate(Some(&format!("Bearer {}", credential.token))),
            Err(AuthError::ExpiredCredential)
        ));
    }

    #[test]
    fn test_bypass_flag_without_test_user_still_enforces_auth() {
        let (half_bypass, sessions) = gate(DevModeConfig::new(true, None));
        let (enforced, _) = gate(DevModeConfig::default());

        assert!(matches!(
            half_bypass.authenticate(None),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            enforced.authenticate(None),
            Err(AuthError::MissingCredential)
        ));

        let credential = sessions.issue("U_REAL").unwrap();
        let header = format!("Bearer {}", credential.token);
        assert_eq!(half_bypass.authenticate(Some(&header)).unwrap().id, "U_REAL");
        assert_eq!(enforced.authenticate(Some(&header)).unwrap().id, "U_REAL");
    }

    #[test]
    fn test_full_bypass_admits_test_user() {
        let (gate, _) = gate(DevModeConfig::new(true, Some("U_TEST".to_string())));

        let authed = gate.authenticate(None).unwrap();
        assert_eq!(authed.id, "U_TEST");
        assert!(authed.bypassed);
    }
}
