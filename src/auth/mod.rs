//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Google ID token verification
//! - First-time user provisioning (sign-up) and sign-in
//! - Session JWT issuance and validation
//! - The request gate and AuthedUser extractor for protected routes

pub mod directory;
pub mod errors;
pub mod extractors;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod session;
pub mod verifier;


pub use directory::{SqliteUserDirectory, UserDirectory};
pub use errors::AuthError;
pub use extractors::AuthedUser;
pub use gate::{require_auth, AuthGate};
pub use models::User;
pub use routes::auth_routes;
pub use service::AuthService;
pub use session::SessionIssuer;
pub use verifier::{GoogleTokenVerifier, IdentityVerifier};
