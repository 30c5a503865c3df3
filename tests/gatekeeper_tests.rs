use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, request::Parts},
};
use trackgate::{
    RenderEnv, classify_path, require_credential,
    auth::{PUBLIC_PATHS, PageOptions, RENDER_MODE_HEADER},
    error::{LOGIN_PATH, PageFailure},
    models::NavigationContext,
    storage::MemoryCredentialStore,
};

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Layout Gatekeeper ---

#[test]
fn test_public_paths_get_empty_context() {
    for path in PUBLIC_PATHS {
        assert_eq!(classify_path(path), NavigationContext::default(), "{}", path);
        assert!(!classify_path(path).is_protected());
    }
}

#[test]
fn test_other_paths_carry_exactly_the_path() {
    for path in ["/tracks", "/upload", "/player/42", "/login/", "/Register", ""] {
        let context = classify_path(path);
        assert_eq!(context.url.as_deref(), Some(path));
        assert!(context.is_protected());
    }
}

#[test]
fn test_context_json_shape() {
    let empty = serde_json::to_value(classify_path("/")).unwrap();
    assert_eq!(empty, serde_json::json!({}));

    let protected = serde_json::to_value(classify_path("/tracks")).unwrap();
    assert_eq!(protected, serde_json::json!({ "url": "/tracks" }));
}

#[tokio::test]
async fn test_context_extractor_uses_path_only() {
    let mut parts = get_request_parts(Method::GET, "/player/9?autoplay=1".parse().unwrap());
    let context = NavigationContext::from_request_parts(&mut parts, &())
        .await
        .unwrap();
    assert_eq!(context.url.as_deref(), Some("/player/9"));
}

// --- Rendering Environment ---

#[tokio::test]
async fn test_render_env_defaults_to_browser() {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    let env = RenderEnv::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(env, RenderEnv::Browser);
}

#[tokio::test]
async fn test_render_env_server_header() {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts
        .headers
        .insert(RENDER_MODE_HEADER, "Server".parse().unwrap());
    let env = RenderEnv::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(env, RenderEnv::Server);
}

#[test]
fn test_client_only_pages_defer_server_renders() {
    assert!(PageOptions::CLIENT_ONLY.defers(RenderEnv::Server));
    assert!(!PageOptions::CLIENT_ONLY.defers(RenderEnv::Browser));
    assert!(!PageOptions::DEFAULT.defers(RenderEnv::Server));
}

// --- Route Guard ---

#[tokio::test]
async fn test_guard_redirects_without_credential() {
    let store = MemoryCredentialStore::new();
    let result = require_credential(RenderEnv::Browser, &store).await;

    let failure = result.unwrap_err();
    assert_eq!(
        failure,
        PageFailure::Redirect {
            status: 302,
            location: LOGIN_PATH.to_string()
        }
    );
    assert_eq!(failure.status(), 302);
    assert_eq!(failure.message(), "/login");
}

#[tokio::test]
async fn test_guard_passes_any_non_empty_credential() {
    for token in ["x", "not-even-a-jwt", "eyJhbGciOiJIUzI1NiJ9.expired.sig"] {
        let store = MemoryCredentialStore::with_token(token);
        assert!(require_credential(RenderEnv::Browser, &store).await.is_ok());
    }
}

#[tokio::test]
async fn test_guard_treats_store_fault_as_logged_out() {
    let store = MemoryCredentialStore::new_failing();
    let failure = require_credential(RenderEnv::Browser, &store)
        .await
        .unwrap_err();
    assert_eq!(failure, PageFailure::login_redirect());
}

#[tokio::test]
async fn test_guard_is_inert_outside_browser() {
    let store = MemoryCredentialStore::new();
    assert!(require_credential(RenderEnv::Server, &store).await.is_ok());
}
