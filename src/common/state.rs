// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::config::AuthConfig;
use super::dev_mode::DevModeConfig;
use crate::auth::{
    AuthGate, AuthService, GoogleTokenVerifier, SessionIssuer, SqliteUserDirectory,
};

/// Application state: read-only after startup, shared as `Arc<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub users: Arc<SqliteUserDirectory>,
    pub auth_service: Arc<AuthService>,
    pub gate: Arc<AuthGate>,
    pub dev_mode: DevModeConfig,
}

impl AppState {
    /// Wires the production collaborators around a pool and HTTP client
    pub fn new(db: SqlitePool, http: Client, config: &AuthConfig) -> Self {
        let users = Arc::new(SqliteUserDirectory::new(db.clone()));
        let sessions = Arc::new(SessionIssuer::new(&config.jwt_secret));
        let verifier = Arc::new(GoogleTokenVerifier::new(
            http,
            config.tokeninfo_url.clone(),
            config.google_client_id.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(verifier, users.clone(), sessions.clone()));
        let gate = Arc::new(AuthGate::new(sessions, config.dev_mode.clone()));

        Self {
            db,
            users,
            auth_service,
            gate,
            dev_mode: config.dev_mode.clone(),
        }
    }
}
