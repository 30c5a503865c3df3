use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Player Router Module
///
/// The player page is not behind the route guard: its loader distinguishes a missing
/// credential (401 error page) from an expired one, which a redirect would hide.
pub fn player_routes() -> Router<AppState> {
    Router::new()
        // GET /player/{id}
        // Loads one track and renders it only if it is ready for playback.
        .route("/player/{id}", get(handlers::player_page))
}
