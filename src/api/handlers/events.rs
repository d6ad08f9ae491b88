//! Handler for the kind-filtered event listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::listing::{EventQueryParams, ListResponse};
use crate::domain::entities::StoredEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recent events of one kind, newest first.
///
/// # Endpoint
///
/// `GET /events?kind=click&limit=20`
///
/// Each item carries a `kind` tag next to the record fields. `limit` defaults
/// to 50 and is clamped to `1..=50`.
pub async fn list_events_handler(
    State(state): State<AppState>,
    Query(params): Query<EventQueryParams>,
) -> Result<Json<ListResponse<StoredEvent>>, AppError> {
    let events = state
        .reporting_service
        .list_recent(params.kind, params.limit)
        .await?;

    Ok(Json(ListResponse::new(events)))
}
