//! Handler for visit-tracked pages.

use axum::extract::{MatchedPath, State};
use serde_json::json;

use crate::domain::route_catalog::find_route;
use crate::error::AppError;
use crate::state::AppState;

/// Serves a tracked page and records the visit.
///
/// Mounted once per entry of [`crate::domain::route_catalog::TRACKED_ROUTES`];
/// the matched route pattern selects the page.
///
/// # Errors
///
/// Returns 500 if the visit cannot be stored. The page body is not served
/// in that case.
pub async fn page_handler(
    State(state): State<AppState>,
    matched: MatchedPath,
) -> Result<&'static str, AppError> {
    let route = find_route(matched.as_str()).ok_or_else(|| {
        AppError::not_found("Page not found", json!({ "path": matched.as_str() }))
    })?;

    state.tracking_service.track_visit(route.path).await?;

    Ok(route.content)
}
