#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use trackgate::{
    api::{ApiResponse, TrackApi},
    error::ApiError,
};

// --- Fake Track API (shared by loader and router tests) ---

/// What the fake answers with on every call.
pub enum Canned {
    Respond(u16, String),
    Refused,
}

/// A `TrackApi` that returns a canned answer and records every call it receives.
pub struct FakeTrackApi {
    canned: Canned,
    calls: AtomicUsize,
    seen: Mutex<Vec<(i64, String)>>,
}

impl FakeTrackApi {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self::new(Canned::Respond(status, body.into()))
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::respond(status, body.to_string())
    }

    pub fn refused() -> Self {
        Self::new(Canned::Refused)
    }

    fn new(canned: Canned) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(i64, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackApi for FakeTrackApi {
    async fn get_track(&self, id: i64, token: &str) -> Result<ApiResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((id, token.to_string()));
        match &self.canned {
            Canned::Respond(status, body) => Ok(ApiResponse {
                status: *status,
                body: body.clone(),
            }),
            Canned::Refused => Err(ApiError::Unavailable(
                "connect error: Connection refused (os error 111) at 10.0.0.7:5000".to_string(),
            )),
        }
    }
}

// --- Track Fixtures ---

pub fn track_json(status: &str, manifest_url: Option<&str>, manifest_type: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "title": "Night Drive",
        "artist": "The Midnight",
        "album": null,
        "status": status,
        "manifest_url": manifest_url,
        "manifest_type": manifest_type,
    })
}

pub fn ready_track_json() -> serde_json::Value {
    track_json("READY", Some("https://x/m3u8"), Some("HLS"))
}
