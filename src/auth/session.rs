//! Session credential issuance and verification (HS256 JWT)

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::{debug, error};

use super::errors::AuthError;
use super::models::{Claims, SessionCredential};

/// Fixed lifetime of every session credential
pub const SESSION_TTL_HOURS: i64 = 19;

/// Why a presented credential was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// Bad signature, wrong shape or otherwise unverifiable
    Malformed,
    /// Well-formed and correctly signed but past its expiry
    Expired,
}

impl From<SessionRejection> for AuthError {
    fn from(rejection: SessionRejection) -> Self {
        match rejection {
            SessionRejection::Malformed => AuthError::InvalidCredential,
            SessionRejection::Expired => AuthError::ExpiredCredential,
        }
    }
}

/// Signs and verifies stateless session credentials with a process-wide secret
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<SessionCredential, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a credential as if signed at `issued_at`
    pub fn issue_at(
        &self,
        user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<SessionCredential, AuthError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, user_id = %user_id, "JWT encoding error during session issuance");
                AuthError::Fault(e.into())
            },
        )?;

        Ok(SessionCredential {
            token,
            issued_at: timestamp_to_utc(claims.iat),
            expires_at: timestamp_to_utc(claims.exp),
        })
    }

    /// Resolves a credential to the internal user id it was issued for
    pub fn verify(&self, token: &str) -> Result<String, SessionRejection> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if !data.claims.sub.is_empty() => Ok(data.claims.sub),
            Ok(_) => {
                debug!("Session token carries an empty subject");
                Err(SessionRejection::Malformed)
            }
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(SessionRejection::Expired),
                _ => {
                    debug!(error = %e, "Session token validation failed");
                    Err(SessionRejection::Malformed)
                }
            },
        }
    }
}

fn timestamp_to_utc(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_with_enough_length!!";

    #[test]
    fn test_issue_then_verify_round_trip() {
        let issuer = SessionIssuer::new(SECRET);
        let credential = issuer.issue("U_ABCDEFGHJK").unwrap();

        assert_eq!(issuer.verify(&credential.token), Ok("U_ABCDEFGHJK".to_string()));
    }

    #[test]
    fn test_lifetime_is_nineteen_hours() {
        let issuer = SessionIssuer::new(SECRET);
        let credential = issuer.issue("U_1").unwrap();

        assert_eq!(
            credential.expires_at - credential.issued_at,
            Duration::hours(19)
        );
    }

    #[test]
    fn test_expired_credential_is_expired_not_malformed() {
        let issuer = SessionIssuer::new(SECRET);
        let credential = issuer
            .issue_at("U_1", Utc::now() - Duration::hours(20))
            .unwrap();

        assert_eq!(issuer.verify(&credential.token), Err(SessionRejection::Expired));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let issuer = SessionIssuer::new(SECRET);
        let other = SessionIssuer::new("another_secret_key_with_enough_len");
        let credential = other.issue("U_1").unwrap();

        assert_eq!(issuer.verify(&credential.token), Err(SessionRejection::Malformed));
    }

    #[test]
    fn test_expired_and_forged_is_malformed() {
        // Signature is checked before expiry
        let issuer = SessionIssuer::new(SECRET);
        let other = SessionIssuer::new("another_secret_key_with_enough_len");
        let credential = other
            .issue_at("U_1", Utc::now() - Duration::hours(20))
            .unwrap();

        assert_eq!(issuer.verify(&credential.token), Err(SessionRejection::Malformed));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = SessionIssuer::new(SECRET);
        assert_eq!(issuer.verify("not-a-jwt"), Err(SessionRejection::Malformed));
        assert_eq!(issuer.verify(""), Err(SessionRejection::Malformed));
    }

    #[test]
    fn test_rejection_maps_to_auth_error() {
        assert!(matches!(
            AuthError::from(SessionRejection::Malformed),
            AuthError::InvalidCredential
        ));
        assert!(matches!(
            AuthError::from(SessionRejection::Expired),
            AuthError::ExpiredCredential
        ));
    }
}
