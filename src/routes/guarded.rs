use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Guarded Router Module
///
/// Pages that require a stored credential before rendering. The route guard itself is
/// attached by `create_router` as a route layer, so these handlers only run once the
/// credential is known to exist.
pub fn guarded_routes() -> Router<AppState> {
    Router::new()
        // GET /tracks
        // The user's track listing; the list itself is fetched client-side.
        .route("/tracks", get(handlers::tracks_page))
        // GET /upload
        // The upload form.
        .route("/upload", get(handlers::upload_page))
}
