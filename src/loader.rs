use crate::{
    api::{ApiResponse, TrackApi},
    auth::RenderEnv,
    error::{
        ApiError, MSG_LOGIN_REQUIRED, MSG_MISSING_PLAYBACK, MSG_NOT_READY, MSG_SESSION_EXPIRED,
        MSG_TRACK_NOT_FOUND, PageFailure, StoreError,
    },
    models::{PlayerData, Track, TrackStatus},
    storage::{CredentialStore, TOKEN_KEY},
};
use thiserror::Error;

/// Everything that can go wrong while loading, before the boundary collapses the
/// untyped cases into `PageFailure::Internal`.
#[derive(Debug, Error)]
enum LoadError {
    #[error(transparent)]
    Page(#[from] PageFailure),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("malformed track body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// load_track
///
/// Loader of the player page: fetches one track by id and returns it only if it is
/// playable. Exactly one request is issued per call and nothing is cached or retried.
///
/// Failures the loader recognises keep their own status and message. Anything else
/// (transport errors, malformed bodies, storage faults) becomes a generic 500 whose
/// detail only reaches the log.
pub async fn load_track(
    env: RenderEnv,
    id: i64,
    store: &dyn CredentialStore,
    api: &dyn TrackApi,
) -> Result<PlayerData, PageFailure> {
    if !env.is_browser() {
        return Ok(PlayerData { track: None });
    }

    tracing::info!(track_id = id, "loading track");

    match fetch_playable(id, store, api).await {
        Ok(track) => Ok(PlayerData { track: Some(track) }),
        Err(LoadError::Page(failure)) => {
            tracing::info!(track_id = id, status = failure.status(), "track load rejected");
            Err(failure)
        }
        Err(e) => {
            tracing::error!(track_id = id, error = %e, "error loading track");
            Err(PageFailure::Internal)
        }
    }
}

async fn fetch_playable(
    id: i64,
    store: &dyn CredentialStore,
    api: &dyn TrackApi,
) -> Result<Track, LoadError> {
    let token = store
        .get(TOKEN_KEY)
        .await?
        .ok_or_else(|| PageFailure::Unauthorized(MSG_LOGIN_REQUIRED.to_string()))?;

    let response = api.get_track(id, &token).await?;
    tracing::debug!(track_id = id, status = response.status, "track response");

    if !response.is_success() {
        if response.status == 401 {
            // The token is presumed expired or revoked.
            store.delete(TOKEN_KEY).await?;
            return Err(PageFailure::Unauthorized(MSG_SESSION_EXPIRED.to_string()).into());
        }
        return Err(PageFailure::UpstreamStatus {
            status: response.status,
        }
        .into());
    }

    let track = decode_track(&response)?
        .ok_or_else(|| PageFailure::NotFound(MSG_TRACK_NOT_FOUND.to_string()))?;

    if track.status != TrackStatus::Ready {
        return Err(PageFailure::BadRequest(MSG_NOT_READY.to_string()).into());
    }
    if !track.is_playable() {
        return Err(PageFailure::BadRequest(MSG_MISSING_PLAYBACK.to_string()).into());
    }

    Ok(track)
}

/// Decodes a success body. Empty and falsy bodies (`null`, `false`, `0`, `""`) mean "no track".
fn decode_track(response: &ApiResponse) -> Result<Option<Track>, serde_json::Error> {
    let body = response.body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<serde_json::Value>(body)? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(None),
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        value => serde_json::from_value(value).map(Some),
    }
}
