//! Handler for the visit listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::listing::{LimitParams, ListResponse};
use crate::domain::entities::Visit;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recent page visits, newest first.
///
/// # Endpoint
///
/// `GET /visits?limit=20`
///
/// `limit` defaults to 50 and is clamped to `1..=50`.
pub async fn list_visits_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ListResponse<Visit>>, AppError> {
    let visits = state
        .reporting_service
        .list_recent_visits(params.limit)
        .await?;

    Ok(Json(ListResponse::new(visits)))
}
