//! Click entity representing a single activation of an interactive control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored button click.
///
/// Created once by the ingestion path and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    pub id: i64,
    pub button_id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(id: i64, button_id: String, username: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            button_id,
            username,
            timestamp,
        }
    }
}

/// Input data for recording a new click.
///
/// `username` is already resolved (guest sentinel applied) by the time a
/// `NewClick` reaches the store. A missing `timestamp` is filled in with the
/// store's current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub button_id: String,
    pub username: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewClick {
    /// Returns true if the click carries a usable button identifier.
    pub fn has_button_id(&self) -> bool {
        !self.button_id.trim().is_empty()
    }
}
