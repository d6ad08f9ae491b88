//! API route configuration.

use crate::api::handlers::{
    analytics_handler, click_summary_handler, health_handler, list_clicks_handler,
    list_events_handler, list_visits_handler, page_handler, route_list_handler, track_click_handler,
};
use crate::api::middleware::rate_limit::IngestLimiter;
use crate::domain::route_catalog::TRACKED_ROUTES;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON endpoints and tracked pages.
///
/// # Endpoints
///
/// - `POST /button-clicks`         - Record a click (rate limited when a limiter is given)
/// - `GET  /button-clicks`         - Recent clicks, at most 50
/// - `GET  /button-clicks/summary` - Per-button counts and distribution
/// - `GET  /visits`                - Recent visits, at most 50
/// - `GET  /events?kind=`          - Recent events of one kind, at most 50
/// - `GET  /analytics`             - Aggregated view and dashboard cards
/// - `GET  /routes`                - Navigation route list
/// - `GET  /health`                - Storage and sink queue status
/// - `GET  /hello`, `/about`, ...  - Tracked pages, each visit is stored
pub fn routes(ingest_limiter: Option<IngestLimiter>) -> Router<AppState> {
    let ingest = match ingest_limiter {
        Some(limiter) => post(track_click_handler).layer(limiter),
        None => post(track_click_handler),
    };

    let router = Router::new()
        .route("/button-clicks", ingest.get(list_clicks_handler))
        .route("/button-clicks/summary", get(click_summary_handler))
        .route("/visits", get(list_visits_handler))
        .route("/events", get(list_events_handler))
        .route("/analytics", get(analytics_handler))
        .route("/routes", get(route_list_handler))
        .route("/health", get(health_handler));

    TRACKED_ROUTES
        .iter()
        .fold(router, |router, page| router.route(page.path, get(page_handler)))
}
