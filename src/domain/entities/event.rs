//! Kind-tagged view over both stored record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Click, Visit};

/// The two logical record kinds kept by the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Visit,
}

/// A stored event of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoredEvent {
    Click(Click),
    Visit(Visit),
}

impl StoredEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::Visit(_) => EventKind::Visit,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Click(c) => c.timestamp,
            Self::Visit(v) => v.timestamp,
        }
    }
}

impl From<Click> for StoredEvent {
    fn from(c: Click) -> Self {
        Self::Click(c)
    }
}

impl From<Visit> for StoredEvent {
    fn from(v: Visit) -> Self {
        Self::Visit(v)
    }
}
