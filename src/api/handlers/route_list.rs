//! Handler for the navigation route list.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::routes::RoutesResponse;
use crate::domain::route_catalog::TRACKED_ROUTES;
use crate::state::AppState;

/// Lists the tracked routes for dashboard navigation.
///
/// # Endpoint
///
/// `GET /routes`
///
/// Serving the list is reported to the analytics sink but is not stored as
/// a visit.
pub async fn route_list_handler(State(state): State<AppState>) -> Json<RoutesResponse> {
    state
        .tracking_service
        .track_route_listing(TRACKED_ROUTES.len());

    Json(RoutesResponse {
        routes: TRACKED_ROUTES,
        timestamp: Utc::now(),
    })
}
