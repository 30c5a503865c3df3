use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core gate components: page checks, the loader, and their collaborators.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod storage;

// Module for routing segregation (Public, Guarded, Player).
pub mod routes;
use routes::{guarded, player, public};

// --- Public Re-exports ---

pub use api::{HttpTrackApi, TrackApi, TrackApiState};
pub use auth::{RenderEnv, classify_path, require_credential};
pub use config::AppConfig;
pub use error::PageFailure;
pub use loader::load_track;
pub use storage::{CredentialState, CredentialStore, FileCredentialStore, MemoryCredentialStore};

/// ApiDoc
///
/// Auto-generated OpenAPI description of the page host, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home_page, handlers::login_page, handlers::register_page,
        handlers::tracks_page, handlers::upload_page, handlers::player_page,
        handlers::store_session, handlers::clear_session
    ),
    components(
        schemas(
            models::Track, models::TrackStatus, models::ManifestType,
            models::NavigationContext, models::PlayerData, models::ErrorPage,
            models::SessionRequest,
        )
    ),
    tags(
        (name = "trackgate", description = "Page gate for the track player front-end")
    )
)]
struct ApiDoc;

/// AppState
///
/// Single shared container for the host's services and configuration, cloned into
/// every request.
#[derive(Clone)]
pub struct AppState {
    /// Persistent credential storage (the `jwt_token` key).
    pub credentials: CredentialState,
    /// Client for the external track API.
    pub tracks: TrackApiState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let handlers and middleware pull only the component they need from AppState.

impl FromRef<AppState> for CredentialState {
    fn from_ref(app_state: &AppState) -> CredentialState {
        app_state.credentials.clone()
    }
}

impl FromRef<AppState> for TrackApiState {
    fn from_ref(app_state: &AppState) -> TrackApiState {
        app_state.tracks.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the page host: routes, the route guard layer, observability layers and state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public pages: no guard.
        .merge(public::public_routes())
        // Guarded pages: the route guard runs before any handler.
        .merge(
            guarded::guarded_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::guard_middleware,
            )),
        )
        // Player: the loader performs its own credential checks.
        .merge(player::player_routes())
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens one span per request carrying the method, URI, `x-request-id` and render mode,
/// so every log line of a page load can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    let render_mode = request
        .headers()
        .get(auth::RENDER_MODE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("browser");

    tracing::info_span!(
        "page_load",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
        render_mode = %render_mode,
    )
}
