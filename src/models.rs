use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Track Schemas (Mirrors the external track API) ---

/// TrackStatus
///
/// Processing state of an uploaded track as reported by the track API.
/// Observed lifecycle: `PENDING -> PROCESSING -> {READY | ERROR}`. Only `READY` permits playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum TrackStatus {
    Pending,
    Processing,
    Ready,
    Error,
}

/// ManifestType
///
/// Streaming format of the playback manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum ManifestType {
    Hls,
    Dash,
}

/// Track
///
/// A read-only snapshot of a media resource, as returned by `GET /api/tracks/{id}`.
/// The track API owns every mutation; this client never writes a track back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub status: TrackStatus,
    // Null until the track reaches READY.
    pub manifest_url: Option<String>,
    pub manifest_type: Option<ManifestType>,

    // Extra columns the API serializes alongside the playback fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub track_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub added_at: Option<NaiveDateTime>,
}

impl Track {
    /// A track is playable only when it is READY and carries both manifest fields.
    /// An empty manifest URL counts as missing.
    pub fn is_playable(&self) -> bool {
        self.status == TrackStatus::Ready
            && self.manifest_url.as_deref().is_some_and(|url| !url.is_empty())
            && self.manifest_type.is_some()
    }
}

// --- Page Schemas (Output to the rendering host) ---

/// NavigationContext
///
/// Layout-level data attached to every page. Empty for public paths; carries the
/// requested path for protected ones so guards further down the chain can consult it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub url: Option<String>,
}

impl NavigationContext {
    pub fn is_protected(&self) -> bool {
        self.url.is_some()
    }
}

/// PlayerData
///
/// Load data of the player page. `track` is `None` only when the loader ran
/// outside a browser-like environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PlayerData {
    pub track: Option<Track>,
}

/// PageData
///
/// The envelope the host renders: the layout context plus the page's own load data.
/// `data` is null for pages whose loader returns nothing and for deferred client-only shells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData<T> {
    pub layout: NavigationContext,
    pub data: Option<T>,
}

impl<T> PageData<T> {
    pub fn new(layout: NavigationContext, data: T) -> Self {
        Self {
            layout,
            data: Some(data),
        }
    }

    pub fn empty(layout: NavigationContext) -> Self {
        Self { layout, data: None }
    }
}

/// ErrorPage
///
/// Body of every rendered error page: an HTTP-like status and a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}

// --- Request Payloads ---

/// SessionRequest
///
/// Login hand-off (PUT /session). The login flow itself lives elsewhere; this only
/// persists the bearer credential it produced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionRequest {
    pub token: String,
}
