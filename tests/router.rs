mod common;

use analytics_tracker::api::middleware::rate_limit::RateLimitSettings;
use analytics_tracker::routes::{RouterOptions, build_router};
use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_dashboard_page_renders() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/button-clicks")
        .json(&json!({ "buttonId": "test-button-1", "username": "alice" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/dashboard").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Analytics Dashboard"));
    assert!(html.contains("test-button-3"));
    assert!(html.contains("alice"));
    assert!(html.contains("100.0%"));
}

#[tokio::test]
async fn test_cors_header_for_configured_origin() {
    let (state, _rx) = common::create_test_state();
    let options = RouterOptions {
        cors_allowed_origin: Some("https://dash.example.com".to_string()),
        rate_limit: None,
    };
    let server = TestServer::new(build_router(state, &options)).unwrap();

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://dash.example.com"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://dash.example.com"
    );
}

#[tokio::test]
async fn test_no_cors_header_by_default() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://dash.example.com"),
        )
        .await;

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[test]
fn test_router_builds_with_rate_limit() {
    let (state, _rx) = common::create_test_state();
    let options = RouterOptions {
        cors_allowed_origin: Some("*".to_string()),
        rate_limit: Some(RateLimitSettings::default()),
    };

    let _router = build_router(state, &options);
}

#[tokio::test]
async fn test_click_ingestion_rate_limited_per_ip() {
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::Request;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    let (state, _rx) = common::create_test_state();
    let options = RouterOptions {
        cors_allowed_origin: None,
        rate_limit: Some(RateLimitSettings {
            replenish_ms: 60_000,
            burst: 2,
        }),
    };
    let app = build_router(state, &options);
    let peer = SocketAddr::from(([203, 0, 113, 7], 40000));

    let click = || {
        Request::builder()
            .method("POST")
            .uri("/button-clicks")
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(peer))
            .body(Body::from(r#"{"buttonId":"test-button-1"}"#))
            .unwrap()
    };

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = app.clone().oneshot(click()).await.unwrap();
        statuses.push(response.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::CREATED,
            StatusCode::CREATED,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );

    // Reads are not limited.
    let list = Request::builder()
        .uri("/button-clicks")
        .extension(ConnectInfo(peer))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.oneshot(list).await.unwrap().status(), StatusCode::OK);
}
