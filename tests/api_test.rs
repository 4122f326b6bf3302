mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chromabot::{
    error::ChromaticError,
    management::CacheGateway,
    server::{AppState, router},
    types::{Rgb, Track},
};
use common::*;
use serde_json::{Value, json};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:4200";

fn app(source: StubTrackSource) -> Router {
    let service = service(
        Arc::new(source),
        CacheGateway::disabled(),
        Arc::new(CountingArtwork::default()),
    );
    router(AppState::new(service), Some(ORIGIN))
}

fn sample_tracks() -> Vec<Track> {
    vec![
        track("Blue Song", "B", Rgb(0, 0, 255), &["X"]),
        track("Red Song", "R", Rgb(255, 0, 0), &["Y", "Z"]),
        track("Red Again", "R", Rgb(255, 0, 0), &["Y"]),
        track("Gray Song", "G", Rgb(128, 128, 128), &["X"]),
    ]
}

async fn send(app: Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(app(StubTrackSource::new(vec![])), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ChromaticBotBackEnd");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_albums_sorted_by_hue() {
    let request = json!({"token": "t", "timeRevision": "1m", "quantitySongs": 10});
    let (status, body) = send(
        app(StubTrackSource::new(sample_tracks())),
        Method::POST,
        "/chromatic/albums",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let albums = body.as_array().unwrap();
    let names: Vec<&str> = albums.iter().map(|a| a["album"].as_str().unwrap()).collect();
    // red and gray both have hue 0 and keep first-seen order
    assert_eq!(names, vec!["Album R", "Album G", "Album B"]);

    let red = &albums[0];
    assert_eq!(red["dominant"], json!([255, 0, 0]));
    assert_eq!(red["colors"].as_array().unwrap().len(), 6);
    assert_eq!(red["color_names"][0], "red");
    assert_eq!(red["colorfulness"], 0.0);
    assert_eq!(red["saturation"], 1.0);
    assert_eq!(red["brightness"], 1.0);
    assert_eq!(
        red["songs"],
        json!([
            {"name": "Red Song", "artists": "Y, Z"},
            {"name": "Red Again", "artists": "Y"}
        ])
    );
    assert!(red["image"].as_str().unwrap().starts_with(ARTWORK_HOST));
}

#[tokio::test]
async fn test_albums_sorted_by_brightness_on_legacy_path() {
    let request = json!({
        "token": "t",
        "timeRevision": "a",
        "quantitySongs": 10,
        "sort_mode": "brightness"
    });
    let (status, body) = send(
        app(StubTrackSource::new(sample_tracks())),
        Method::POST,
        "/get_albums_by_chromaticity",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["album"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Album B", "Album R", "Album G"]);
}

#[tokio::test]
async fn test_invalid_parameters_are_bad_requests() {
    for request in [
        json!({"token": "t", "timeRevision": "2w", "quantitySongs": 10}),
        json!({"token": "t", "timeRevision": " 1m", "quantitySongs": 10}),
        json!({"token": "t", "timeRevision": "6M", "quantitySongs": 10}),
        json!({"token": "t", "timeRevision": "1m", "quantitySongs": 0}),
        json!({"token": "t", "timeRevision": "1m", "quantitySongs": 51}),
    ] {
        let (status, body) = send(
            app(StubTrackSource::new(sample_tracks())),
            Method::POST,
            "/chromatic/albums",
            Some(request),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("Invalid parameter"));
    }
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let (status, _) = send(
        app(StubTrackSource::new(sample_tracks())),
        Method::POST,
        "/chromatic/albums",
        Some(json!({"token": "t"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upstream_failures_keep_their_status() {
    let request = json!({"token": "expired", "timeRevision": "6m", "quantitySongs": 5});

    let (status, body) = send(
        app(StubTrackSource::failing(|| ChromaticError::UpstreamUnauthorized)),
        Method::POST,
        "/chromatic/albums",
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid or expired access token");

    let (status, _) = send(
        app(StubTrackSource::failing(|| ChromaticError::UpstreamError {
            status: 429,
            message: "rate limited".to_string(),
        })),
        Method::POST,
        "/chromatic/albums",
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = send(
        app(StubTrackSource::failing(|| {
            ChromaticError::UpstreamUnavailable("connection refused".to_string())
        })),
        Method::POST,
        "/chromatic/albums",
        Some(request),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_groups_endpoint() {
    let request = json!({"token": "t", "timeRevision": "6m", "quantitySongs": 10});
    let (status, body) = send(
        app(StubTrackSource::new(sample_tracks())),
        Method::POST,
        "/chromatic/groups",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let groups: Vec<Vec<&str>> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| {
            g.as_array()
                .unwrap()
                .iter()
                .map(|a| a["album"].as_str().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(groups, vec![vec!["Album B", "Album R"], vec!["Album G"]]);
}

#[tokio::test]
async fn test_groups_threshold_out_of_range() {
    let request = json!({"token": "t", "timeRevision": "6m", "quantitySongs": 10, "threshold": 2.0});
    let (status, _) = send(
        app(StubTrackSource::new(sample_tracks())),
        Method::POST,
        "/chromatic/groups",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight_allows_client_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chromatic/albums")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(StubTrackSource::new(vec![]))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ORIGIN
    );
}
