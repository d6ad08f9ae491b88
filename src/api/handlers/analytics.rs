//! Handler for the aggregated analytics report.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::application::services::AnalyticsReport;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the aggregated view with dashboard cards.
///
/// # Endpoint
///
/// `GET /analytics`
///
/// # Response
///
/// ```json
/// {
///   "view": {
///     "totalHits": 3,
///     "perEndpointHits": { "/about": 1, "/hello": 2 },
///     "totalClicks": 1,
///     "perButtonClickCounts": { "export-data-btn": 1 },
///     "timestampsByDay": { "2026-03-01": 3 },
///     "clicksByDay": { "2026-03-01": 1 },
///     "mostRecentEvent": "2026-03-01T10:00:00Z"
///   },
///   "summary": { "visitsToday": 3, "avgVisitsPerDay": 0, ... },
///   "endpoints": [ { "endpoint": "/hello", "hits": 2, ... } ]
/// }
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let report = state.reporting_service.analytics_report(Utc::now()).await?;
    Ok(Json(report))
}
