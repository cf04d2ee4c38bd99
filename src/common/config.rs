// src/common/config.rs
//! Process-wide configuration, read once at startup

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::env;

use super::dev_mode::DevModeConfig;
use super::id_generator::generate_raw_id;

pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const DEFAULT_DATABASE_URL: &str = "sqlite://species_api.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_PORT: u16 = 8080;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Authentication settings handed to the session issuer, verifier and gate
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub google_client_id: Option<String>,
    pub tokeninfo_url: String,
    pub dev_mode: DevModeConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env(dev_mode: DevModeConfig) -> Result<Self> {
        Self::from_vars(env::vars().collect(), dev_mode)
    }

    /// Builds the configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>, dev_mode: DevModeConfig) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                bail!(
                    "JWT_SECRET must be at least {} characters",
                    MIN_JWT_SECRET_LEN
                )
            }
            Some(secret) => secret,
            // Sessions minted in bypass mode only need to live as long as the process
            None if dev_mode.is_enabled() => generate_raw_id(64),
            None => bail!("JWT_SECRET is required when authentication is enforced"),
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>()?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>();

        // Credentialed CORS cannot use a wildcard origin
        if cors_origins.iter().any(|origin| origin == "*") {
            bail!("CORS_ORIGINS must list explicit origins; '*' is not allowed with credentials");
        }

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port,
            cors_origins,
            auth: AuthConfig {
                jwt_secret,
                google_client_id: get("GOOGLE_CLIENT_ID"),
                tokeninfo_url: get("GOOGLE_TOKENINFO_URL")
                    .unwrap_or_else(|| DEFAULT_TOKENINFO_URL.to_string()),
                dev_mode,
            },
        })
    }
}
