use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trackgate::{
    AppState,
    api::{HttpTrackApi, TrackApiState},
    config::{AppConfig, Env},
    create_router,
    storage::{CredentialState, FileCredentialStore},
};

/// main
///
/// Entry point of the page host: configuration, logging, the credential store,
/// the track API client and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast in production)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trackgate=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Credential Store
    let store = FileCredentialStore::new(&config.credential_file);
    tracing::info!(path = %store.path().display(), "credential store ready");
    let credentials = Arc::new(store) as CredentialState;

    // 4. Track API Client
    let api = HttpTrackApi::new(&config.track_api_url, config.track_api_timeout)
        .expect("FATAL: Failed to build the track API client.");
    tracing::info!(base_url = %config.track_api_url, "track API client ready");
    let tracks = Arc::new(api) as TrackApiState;

    // 5. Unified State Assembly
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        credentials,
        tracks,
        config,
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the listen address. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
