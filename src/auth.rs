use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::{
    error::PageFailure,
    models::NavigationContext,
    storage::{CredentialStore, TOKEN_KEY},
};

/// Paths every visitor may render without a credential.
pub const PUBLIC_PATHS: [&str; 3] = ["/", "/login", "/register"];

/// Header the rendering host sets when it pre-renders a page outside the browser.
pub const RENDER_MODE_HEADER: &str = "x-render-mode";

/// RenderEnv
///
/// Whether the caller runs in a browser-like environment, i.e. one with access to
/// client-local persistent storage and the network. Injected into guards and loaders
/// rather than read from a global, so both branches are testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderEnv {
    #[default]
    Browser,
    /// Server-side pre-render: no persistent storage is available.
    Server,
}

impl RenderEnv {
    pub fn is_browser(self) -> bool {
        self == RenderEnv::Browser
    }
}

/// RenderEnv Extractor Implementation
///
/// `x-render-mode: server` selects `Server`; any other value, or no header, is `Browser`.
impl<S> FromRequestParts<S> for RenderEnv
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let server = parts
            .headers
            .get(RENDER_MODE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("server"));

        Ok(if server {
            RenderEnv::Server
        } else {
            RenderEnv::Browser
        })
    }
}

/// PageOptions
///
/// Per-page rendering declarations. Pages that depend on browser-only storage set
/// `ssr: false` and are never pre-rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub ssr: bool,
}

impl PageOptions {
    pub const CLIENT_ONLY: PageOptions = PageOptions { ssr: false };
    pub const DEFAULT: PageOptions = PageOptions { ssr: true };

    /// True when this request must get the empty client-side shell instead of a load.
    pub fn defers(self, env: RenderEnv) -> bool {
        !self.ssr && env == RenderEnv::Server
    }
}

// --- Layout Gatekeeper ---

/// classify_path
///
/// Pure public/protected classification of the page about to render.
/// Public paths yield the empty context; every other path yields a context carrying it.
pub fn classify_path(path: &str) -> NavigationContext {
    if PUBLIC_PATHS.contains(&path) {
        NavigationContext::default()
    } else {
        NavigationContext {
            url: Some(path.to_string()),
        }
    }
}

/// NavigationContext Extractor Implementation
///
/// Lets every page handler receive its layout data straight from the request URI.
impl<S> FromRequestParts<S> for NavigationContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(classify_path(parts.uri.path()))
    }
}

// --- Route Guard ---

/// require_credential
///
/// Pre-render check for the tracks listing and upload pages. Only presence of the stored
/// credential is checked; an expired token passes here and surfaces later as a 401 from
/// the page's own data fetch.
///
/// Outside the browser there is no storage to consult and the guard passes.
/// A storage fault is treated as "logged out".
pub async fn require_credential(
    env: RenderEnv,
    store: &dyn CredentialStore,
) -> Result<(), PageFailure> {
    if !env.is_browser() {
        return Ok(());
    }

    match store.get(TOKEN_KEY).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            tracing::debug!("no stored credential, redirecting to login");
            Err(PageFailure::login_redirect())
        }
        Err(e) => {
            tracing::warn!(error = %e, "credential store unreadable, redirecting to login");
            Err(PageFailure::login_redirect())
        }
    }
}
