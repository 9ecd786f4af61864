//! Router configuration for the HTTP API.
//!
//! Login, registration and the error page are reachable anonymously.
//! Every other route sits behind the session gate.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{error_page, get_user, home, login, logout, register, AppState};
use super::middleware::{require_session, security_headers};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/errorpage", get(error_page));

    let protected_routes = Router::new()
        .route("/logout", post(logout))
        .route("/home", get(home))
        .route("/users/:username", get(get_user))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
