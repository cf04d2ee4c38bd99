//! Authentication routes

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::{gate::require_auth, handlers};

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/google/signup` - Google sign-up (first time only)
/// - `POST /api/auth/google/signin` - Google sign-in (existing accounts)
/// - `POST /api/auth/logout` - Logout (client-side token removal)
/// - `GET /api/me` - Get current user information
/// - `GET /api/health` - Liveness and database check
pub fn auth_routes() -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", post(handlers::logout_handler))
        .route("/api/me", get(handlers::me_handler))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/api/auth/google/signup", post(handlers::google_sign_up))
        .route("/api/auth/google/signin", post(handlers::google_sign_in))
        .route("/api/health", get(handlers::health_handler))
        .merge(protected)
}
