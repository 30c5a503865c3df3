use std::env;
use std::time::Duration;

/// AppConfig
///
/// Holds the host's entire configuration. Immutable once loaded and pulled into the
/// application state via FromRef, like every other shared component.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the external track API (e.g. http://localhost:5000).
    pub track_api_url: String,
    // Per-request timeout for the track API call.
    pub track_api_timeout: Duration,
    // Location of the JSON file backing the persistent credential store.
    pub credential_file: String,
    // Address the page host listens on.
    pub bind_addr: String,
    // Runtime environment marker. Selects log format and which values are mandatory.
    pub env: Env,
}

/// Env
///
/// Runtime context: local development or production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_TRACK_API_URL: &str = "http://localhost:5000";
const DEFAULT_CREDENTIAL_FILE: &str = ".trackgate/credentials.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl Default for AppConfig {
    /// Safe, non-panicking values for test setup, without touching the environment.
    fn default() -> Self {
        Self {
            track_api_url: DEFAULT_TRACK_API_URL.to_string(),
            track_api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credential_file: DEFAULT_CREDENTIAL_FILE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics in production when `TRACK_API_URL` is not set, and in any environment when
    /// `TRACK_API_TIMEOUT_SECS` is set but not a positive integer. The host must not start
    /// against an unknown API.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let track_api_url = match env {
            Env::Production => env::var("TRACK_API_URL")
                .expect("FATAL: TRACK_API_URL must be set in production."),
            Env::Local => {
                env::var("TRACK_API_URL").unwrap_or_else(|_| DEFAULT_TRACK_API_URL.to_string())
            }
        };

        let timeout_secs = match env::var("TRACK_API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .expect("FATAL: TRACK_API_TIMEOUT_SECS must be a positive integer."),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            track_api_url,
            track_api_timeout: Duration::from_secs(timeout_secs),
            credential_file: env::var("CREDENTIAL_FILE")
                .unwrap_or_else(|_| DEFAULT_CREDENTIAL_FILE.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            env,
        }
    }
}
