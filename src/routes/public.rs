use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a stored credential. The page handlers here return an
/// empty layout context because their paths are on the public allow-list.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe; returns "ok" without touching storage or the track API.
        .route("/health", get(|| async { "ok" }))
        // GET /, /login, /register
        // Public page shells.
        .route("/", get(handlers::home_page))
        .route("/login", get(handlers::login_page))
        .route("/register", get(handlers::register_page))
        // PUT/DELETE /session
        // Login hand-off and logout: write or remove the stored credential.
        .route(
            "/session",
            axum::routing::put(handlers::store_session).delete(handlers::clear_session),
        )
}
