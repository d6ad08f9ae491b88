//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::dashboard_handler;
use axum::{Router, routing::get};

/// Browser-facing pages.
///
/// # Endpoints
///
/// - `GET /dashboard` - Analytics dashboard with test buttons
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard_handler))
}
