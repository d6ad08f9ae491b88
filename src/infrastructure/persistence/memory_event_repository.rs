//! In-process event store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Click, NewClick, NewVisit, Visit};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    clicks: Vec<Click>,
    visits: Vec<Visit>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Event store kept in memory.
///
/// Used when no database is configured and by the HTTP tests. Records live
/// for the lifetime of the process. Ids are shared across both record kinds
/// and strictly increasing.
#[derive(Default)]
pub struct MemoryEventRepository {
    tables: RwLock<Tables>,
}

impl MemoryEventRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory event store");
        Self::default()
    }
}

fn newest_first<T: Clone>(
    items: &[T],
    limit: i64,
    key: impl Fn(&T) -> (chrono::DateTime<Utc>, i64),
) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by_key(|item| Reverse(key(item)));
    sorted.truncate(limit.max(0) as usize);
    sorted
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn append_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        if !new_click.has_button_id() {
            return Err(AppError::bad_request(
                "buttonId is required",
                json!({ "field": "buttonId" }),
            ));
        }

        let mut tables = self.tables.write().await;
        let click = Click::new(
            tables.next_id(),
            new_click.button_id,
            new_click.username,
            new_click.timestamp.unwrap_or_else(Utc::now),
        );
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let mut tables = self.tables.write().await;
        let visit = Visit::new(tables.next_id(), new_visit.endpoint, Utc::now());
        tables.visits.push(visit.clone());

        Ok(visit)
    }

    async fn recent_clicks(&self, limit: i64) -> Result<Vec<Click>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.clicks, limit, |c| (c.timestamp, c.id)))
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<Visit>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.visits, limit, |v| (v.timestamp, v.id)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
