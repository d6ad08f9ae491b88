//! DTO for the navigation route list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::route_catalog::Route;

/// Response of `GET /routes`.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: &'static [Route],
    pub timestamp: DateTime<Utc>,
}
