//! Handlers for click ingestion and listing.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::clicks::{TrackClickRequest, TrackClickResponse};
use crate::api::dto::listing::{LimitParams, ListResponse};
use crate::application::services::ClickSummary;
use crate::domain::entities::Click;
use crate::error::AppError;
use crate::state::AppState;

/// Records a button click.
///
/// # Endpoint
///
/// `POST /button-clicks`
///
/// # Request Body
///
/// ```json
/// {
///   "buttonId": "export-data-btn",
///   "username": "alice",                  // optional, defaults to "guest"
///   "timestamp": "2026-03-01T10:00:00Z"   // optional, defaults to server time
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: click stored, body echoes the record
/// - **400 Bad Request**: malformed JSON or missing `buttonId`
/// - **500 Internal Server Error**: event store unavailable
///
/// Forwarding to the external sink happens after the response is decided
/// and never changes it.
pub async fn track_click_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrackClickRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TrackClickResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let click = state.tracking_service.track_click(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(TrackClickResponse::tracked(click))))
}

/// Lists the most recent clicks, newest first.
///
/// # Endpoint
///
/// `GET /button-clicks?limit=20`
///
/// `limit` defaults to 50 and is clamped to `1..=50`.
pub async fn list_clicks_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ListResponse<Click>>, AppError> {
    let clicks = state
        .reporting_service
        .list_recent_clicks(params.limit)
        .await?;

    Ok(Json(ListResponse::new(clicks)))
}

/// Per-button click counts and distribution slices.
///
/// # Endpoint
///
/// `GET /button-clicks/summary`
pub async fn click_summary_handler(
    State(state): State<AppState>,
) -> Result<Json<ClickSummary>, AppError> {
    let summary = state.reporting_service.click_summary().await?;
    Ok(Json(summary))
}
