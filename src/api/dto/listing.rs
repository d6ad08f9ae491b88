//! Query parameters and envelope for recent-activity listings.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::EventKind;

/// `?limit=` query parameter.
///
/// Uses `serde_with` to parse the number from the query string. Values are
/// clamped by the reporting service, so out-of-range numbers are not errors.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// `?kind=click|visit&limit=` query parameters.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct EventQueryParams {
    pub kind: EventKind,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Envelope for list responses.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
