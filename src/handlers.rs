use crate::{
    AppState,
    api::TrackApiState,
    auth::{PageOptions, RenderEnv, require_credential},
    error::{MSG_TRACK_NOT_FOUND, PageFailure},
    loader,
    models::{ErrorPage, NavigationContext, PageData, PlayerData, SessionRequest},
    storage::{CredentialState, TOKEN_KEY},
};
use axum::{
    Json,
    extract::{Path, Request, State, rejection::PathRejection},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Rendering declarations: both the guarded pages and the player read browser-only storage.
pub const GUARDED_PAGE: PageOptions = PageOptions::CLIENT_ONLY;
pub const PLAYER_PAGE: PageOptions = PageOptions::CLIENT_ONLY;

// --- Middleware ---

/// guard_middleware
///
/// Route layer for the tracks listing and upload pages. Runs the route guard before the
/// page handler; without a stored credential the request is answered with the `/login`
/// redirect and the handler never runs.
///
/// Server pre-render requests pass straight through: the guard has no storage to read there.
pub async fn guard_middleware(
    State(credentials): State<CredentialState>,
    env: RenderEnv,
    request: Request,
    next: Next,
) -> Response {
    if GUARDED_PAGE.defers(env) {
        return next.run(request).await;
    }

    match require_credential(env, credentials.as_ref()).await {
        Ok(()) => next.run(request).await,
        Err(failure) => failure.into_response(),
    }
}

// --- Public Pages ---

// Public pages carry no load data; their layout context is always empty.
fn public_shell(layout: NavigationContext) -> Json<PageData<()>> {
    Json(PageData::empty(layout))
}

/// home_page
///
/// [Public Route] Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Page shell", body = NavigationContext))
)]
pub async fn home_page(layout: NavigationContext) -> Json<PageData<()>> {
    public_shell(layout)
}

/// login_page
///
/// [Public Route] Login form. The login call itself goes straight to the track API.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Page shell", body = NavigationContext))
)]
pub async fn login_page(layout: NavigationContext) -> Json<PageData<()>> {
    public_shell(layout)
}

#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Page shell", body = NavigationContext))
)]
pub async fn register_page(layout: NavigationContext) -> Json<PageData<()>> {
    public_shell(layout)
}

// --- Guarded Pages ---

/// tracks_page
///
/// [Guarded Route] Tracks listing. Data is fetched client-side; the host only gates access.
#[utoipa::path(
    get,
    path = "/tracks",
    responses(
        (status = 200, description = "Page shell", body = NavigationContext),
        (status = 302, description = "Not logged in, redirect to /login")
    )
)]
pub async fn tracks_page(layout: NavigationContext) -> Json<PageData<()>> {
    Json(PageData::empty(layout))
}

/// upload_page
///
/// [Guarded Route] Track upload form.
#[utoipa::path(
    get,
    path = "/upload",
    responses(
        (status = 200, description = "Page shell", body = NavigationContext),
        (status = 302, description = "Not logged in, redirect to /login")
    )
)]
pub async fn upload_page(layout: NavigationContext) -> Json<PageData<()>> {
    Json(PageData::empty(layout))
}

// --- Player Page ---

/// player_page
///
/// [Protected Route] Loads one track and returns it only if it can be played.
/// Every failure is rendered as an error page with its own status and message. An id
/// that is not an integer cannot name a track and is answered as "Track not found".
#[utoipa::path(
    get,
    path = "/player/{id}",
    params(("id" = i64, Path, description = "Track ID")),
    responses(
        (status = 200, description = "Playable track", body = PlayerData),
        (status = 400, description = "Track not ready or incomplete", body = ErrorPage),
        (status = 401, description = "Not logged in or session expired", body = ErrorPage),
        (status = 404, description = "Track not found", body = ErrorPage),
        (status = 500, description = "Failed to load track", body = ErrorPage)
    )
)]
pub async fn player_page(
    layout: NavigationContext,
    env: RenderEnv,
    State(credentials): State<CredentialState>,
    State(api): State<TrackApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PageData<PlayerData>>, PageFailure> {
    if PLAYER_PAGE.defers(env) {
        return Ok(Json(PageData::empty(layout)));
    }

    let Path(id) = id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid track id");
        PageFailure::NotFound(MSG_TRACK_NOT_FOUND.to_string())
    })?;

    let data = loader::load_track(env, id, credentials.as_ref(), api.as_ref()).await?;
    Ok(Json(PageData::new(layout, data)))
}

// --- Session Hand-off ---

/// store_session
///
/// [Public Route] Persists the bearer credential produced by the external login flow.
#[utoipa::path(
    put,
    path = "/session",
    request_body = SessionRequest,
    responses(
        (status = 204, description = "Credential stored"),
        (status = 400, description = "Empty token", body = ErrorPage),
        (status = 500, description = "Credential store failure")
    )
)]
pub async fn store_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Response {
    let token = payload.token.trim();
    if token.is_empty() {
        let page = ErrorPage {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: "Token must not be empty".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(page)).into_response();
    }

    match state.credentials.set(TOKEN_KEY, token).await {
        Ok(()) => {
            tracing::info!("credential stored");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to store credential");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// clear_session
///
/// [Public Route] Logout: removes the stored credential. Idempotent.
#[utoipa::path(
    delete,
    path = "/session",
    responses(
        (status = 204, description = "Credential removed"),
        (status = 500, description = "Credential store failure")
    )
)]
pub async fn clear_session(State(credentials): State<CredentialState>) -> StatusCode {
    match credentials.delete(TOKEN_KEY).await {
        Ok(()) => {
            tracing::info!("credential cleared");
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to clear credential");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
