use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ApiError;

/// ApiResponse
///
/// A raw answer from the track API: the status code and the undecoded body.
/// Interpretation (auth failures, readiness) belongs to the loader, not the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// TrackApi Trait
///
/// Contract for the single call this crate makes against the external track API.
/// `Send + Sync + async_trait` so the client can be shared as `Arc<dyn TrackApi>`
/// across request tasks, and replaced by a fake in tests.
#[async_trait]
pub trait TrackApi: Send + Sync {
    /// `GET /api/tracks/{id}` with `Authorization: Bearer <token>`.
    ///
    /// Returns `Err` only when no HTTP status could be obtained (connection refused,
    /// timeout, broken body stream). Every status code, including 4xx/5xx, is `Ok`.
    async fn get_track(&self, id: i64, token: &str) -> Result<ApiResponse, ApiError>;
}

/// TrackApiState
///
/// The concrete type used to share the track API client across the application state.
pub type TrackApiState = Arc<dyn TrackApi>;

/// HttpTrackApi
///
/// `reqwest`-backed implementation. No retries are attempted: one call, one answer.
#[derive(Clone)]
pub struct HttpTrackApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTrackApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn track_url(&self, id: i64) -> String {
        format!("{}/api/tracks/{}", self.base_url, id)
    }
}

#[async_trait]
impl TrackApi for HttpTrackApi {
    async fn get_track(&self, id: i64, token: &str) -> Result<ApiResponse, ApiError> {
        let url = self.track_url(id);
        tracing::debug!(%url, "fetching track");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, "track API responded");
        Ok(ApiResponse { status, body })
    }
}
