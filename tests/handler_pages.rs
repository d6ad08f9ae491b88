mod common;

use axum::http::StatusCode;

use analytics_tracker::domain::route_catalog::TRACKED_ROUTES;
use analytics_tracker::domain::sink_event::SinkEvent;

#[tokio::test]
async fn test_tracked_page_records_visit() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/about").await;

    response.assert_status_ok();
    response.assert_text("About Us");

    let visits = server.get("/visits").await.json::<serde_json::Value>();
    assert_eq!(visits["count"], 1);
    assert_eq!(visits["data"][0]["endpoint"], "/about");

    assert_eq!(
        rx.try_recv().unwrap(),
        SinkEvent::PageView {
            page_location: "/about".to_string()
        }
    );
}

#[tokio::test]
async fn test_every_tracked_route_is_served() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    for route in TRACKED_ROUTES {
        let response = server.get(route.path).await;
        response.assert_status_ok();
        response.assert_text(route.content);
    }

    let visits = server.get("/visits").await.json::<serde_json::Value>();
    assert_eq!(visits["count"], TRACKED_ROUTES.len());
    // Newest first: the last route requested comes back first.
    assert_eq!(
        visits["data"][0]["endpoint"],
        TRACKED_ROUTES[TRACKED_ROUTES.len() - 1].path
    );
}

#[tokio::test]
async fn test_page_fails_when_visit_not_stored() {
    let (state, _rx) = common::create_failing_state();
    let server = common::test_server(state);

    let response = server.get("/hello").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "storage_error");
}

#[tokio::test]
async fn test_untracked_path_is_404() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .get("/not-a-page")
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_route_list() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/routes").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let routes = body["routes"].as_array().unwrap();

    assert_eq!(routes.len(), TRACKED_ROUTES.len());
    assert_eq!(routes[0]["path"], "/hello");
    assert_eq!(routes[0]["name"], "Home");
    assert!(routes[0].get("content").is_none());
    assert!(body["timestamp"].is_string());

    // Listing routes is reported but not stored as a visit.
    assert_eq!(rx.try_recv().unwrap(), SinkEvent::RouteListView { route_count: 5 });
    let visits = server.get("/visits").await.json::<serde_json::Value>();
    assert_eq!(visits["count"], 0);
}
