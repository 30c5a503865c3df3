use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorPage;

/// Target of every not-logged-in redirect.
pub const LOGIN_PATH: &str = "/login";

pub const MSG_LOGIN_REQUIRED: &str = "Please log in to access this content";
pub const MSG_SESSION_EXPIRED: &str = "Session expired. Please log in again";
pub const MSG_TRACK_NOT_FOUND: &str = "Track not found";
pub const MSG_NOT_READY: &str = "This track is not ready for playback";
pub const MSG_MISSING_PLAYBACK: &str = "Track is missing playback information";
pub const MSG_LOAD_FAILED: &str = "Failed to load track";

/// PageFailure
///
/// Every way a page load can end without data. Guards and loaders return this
/// instead of panicking or unwinding, so the host sees all exit paths at the call site.
/// None of the variants carry internal error detail; that is logged where it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageFailure {
    /// Not logged in: the host must stop rendering and navigate to `location`.
    #[error("redirect ({status}) to {location}")]
    Redirect { status: u16, location: String },
    /// Missing or expired credential.
    #[error("{0}")]
    Unauthorized(String),
    /// The track API answered successfully but with no resource.
    #[error("{0}")]
    NotFound(String),
    /// The resource exists but is not renderable (not ready, or incomplete).
    #[error("{0}")]
    BadRequest(String),
    /// Passthrough of any other non-success status from the track API.
    #[error("Failed to load track")]
    UpstreamStatus { status: u16 },
    /// Anything unexpected: transport errors, malformed bodies, storage faults.
    #[error("Failed to load track")]
    Internal,
}

impl PageFailure {
    pub fn login_redirect() -> Self {
        PageFailure::Redirect {
            status: StatusCode::FOUND.as_u16(),
            location: LOGIN_PATH.to_string(),
        }
    }

    /// The HTTP-like status the host should render.
    pub fn status(&self) -> u16 {
        match self {
            PageFailure::Redirect { status, .. } => *status,
            PageFailure::Unauthorized(_) => 401,
            PageFailure::NotFound(_) => 404,
            PageFailure::BadRequest(_) => 400,
            PageFailure::UpstreamStatus { status } => *status,
            PageFailure::Internal => 500,
        }
    }

    /// The user-facing message. For redirects this is the target path.
    pub fn message(&self) -> String {
        match self {
            PageFailure::Redirect { location, .. } => location.clone(),
            other => other.to_string(),
        }
    }

    pub fn to_error_page(&self) -> ErrorPage {
        ErrorPage {
            status: self.status(),
            message: self.message(),
        }
    }
}

/// Translates a failure into what the host sends to the client: a redirect with a
/// `Location` header, or an error page carrying the status and message.
impl IntoResponse for PageFailure {
    fn into_response(self) -> Response {
        // An upstream code outside the valid HTTP range cannot be passed through as-is.
        let status = StatusCode::from_u16(self.status()).unwrap_or(StatusCode::BAD_GATEWAY);

        match self {
            PageFailure::Redirect { location, .. } => {
                (status, [(header::LOCATION, location)]).into_response()
            }
            other => (status, Json(other.to_error_page())).into_response(),
        }
    }
}

/// StoreError
///
/// Failures of the credential store. Internal only: never shown to the end user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// ApiError
///
/// Transport-level failures talking to the track API (no HTTP status was obtained).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("track API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("track API unavailable: {0}")]
    Unavailable(String),
}
