use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use trackgate::{
    error::PageFailure,
    models::{ManifestType, PageData, PlayerData, Track, TrackStatus},
};

#[test]
fn test_track_status_wire_names() {
    // The API sends upper-case enum values.
    for (raw, status) in [
        ("PENDING", TrackStatus::Pending),
        ("PROCESSING", TrackStatus::Processing),
        ("READY", TrackStatus::Ready),
        ("ERROR", TrackStatus::Error),
    ] {
        let parsed: TrackStatus = serde_json::from_value(serde_json::json!(raw)).unwrap();
        assert_eq!(parsed, status);
    }

    let dash: ManifestType = serde_json::from_str(r#""DASH""#).unwrap();
    assert_eq!(dash, ManifestType::Dash);
    assert!(serde_json::from_str::<TrackStatus>(r#""ready""#).is_err());
}

#[test]
fn test_track_tolerates_extra_api_fields() {
    let json = r#"{
        "id": 5, "user_id": 2, "title": "t", "artist": null, "album": null,
        "track_number": null, "duration_ms": null,
        "status": "ERROR", "manifest_url": null, "manifest_type": null,
        "error_message": "ffmpeg exited with code 1", "added_at": "2024-05-01T12:30:00.123456",
        "unexpected": true
    }"#;

    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.status, TrackStatus::Error);
    assert_eq!(track.error_message.as_deref(), Some("ffmpeg exited with code 1"));
    assert!(!track.is_playable());
}

#[test]
fn test_playable_requires_ready_and_both_manifest_fields() {
    let mut track: Track = serde_json::from_value(serde_json::json!({
        "id": 1, "title": "t", "artist": null, "album": null,
        "status": "READY", "manifest_url": "https://x/m3u8", "manifest_type": "HLS"
    }))
    .unwrap();
    assert!(track.is_playable());

    track.manifest_type = None;
    assert!(!track.is_playable());

    track.manifest_type = Some(ManifestType::Hls);
    track.manifest_url = Some(String::new());
    assert!(!track.is_playable());

    track.manifest_url = Some("https://x/manifest.mpd".to_string());
    track.manifest_type = Some(ManifestType::Dash);
    assert!(track.is_playable());
    track.status = TrackStatus::Processing;
    assert!(!track.is_playable());
}

#[test]
fn test_page_data_envelope() {
    let page = PageData::new(Default::default(), PlayerData { track: None });
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json, serde_json::json!({ "layout": {}, "data": { "track": null } }));
}

#[test]
fn test_failure_status_mapping() {
    assert_eq!(PageFailure::login_redirect().status(), 302);
    assert_eq!(PageFailure::Unauthorized("x".into()).status(), 401);
    assert_eq!(PageFailure::NotFound("x".into()).status(), 404);
    assert_eq!(PageFailure::BadRequest("x".into()).status(), 400);
    assert_eq!(PageFailure::UpstreamStatus { status: 418 }.status(), 418);
    assert_eq!(PageFailure::Internal.status(), 500);
    assert_eq!(PageFailure::Internal.message(), "Failed to load track");
}

#[test]
fn test_redirect_response_has_location() {
    let response = PageFailure::login_redirect().into_response();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[test]
fn test_invalid_upstream_status_renders_as_bad_gateway() {
    let response = PageFailure::UpstreamStatus { status: 42 }.into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
