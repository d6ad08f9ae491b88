//! Visit entity representing a request to a tracked route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored page visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(id: i64, endpoint: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            endpoint,
            timestamp,
        }
    }
}

/// Input data for recording a visit. The timestamp is always server-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub endpoint: String,
}

impl NewVisit {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}
