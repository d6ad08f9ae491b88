//! Repository trait for the append-only event store.

use crate::domain::entities::{Click, EventKind, NewClick, NewVisit, StoredEvent, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click and visit records.
///
/// The store is append-only: there are no update or delete operations.
/// Query results are ordered newest first, ties broken by id descending.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEventRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryEventRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Stores a click, assigning the current time when `timestamp` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `button_id` is blank.
    /// Returns [`AppError::StorageUnavailable`] if the store cannot be written.
    async fn append_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Stores a visit with a server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if the store cannot be written.
    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Returns at most `limit` clicks, newest first.
    async fn recent_clicks(&self, limit: i64) -> Result<Vec<Click>, AppError>;

    /// Returns at most `limit` visits, newest first.
    async fn recent_visits(&self, limit: i64) -> Result<Vec<Visit>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Returns at most `limit` events of the given kind, newest first.
pub async fn query_recent<R: EventRepository + ?Sized>(
    repository: &R,
    kind: EventKind,
    limit: i64,
) -> Result<Vec<StoredEvent>, AppError> {
    let events = match kind {
        EventKind::Click => repository
            .recent_clicks(limit)
            .await?
            .into_iter()
            .map(StoredEvent::from)
            .collect(),
        EventKind::Visit => repository
            .recent_visits(limit)
            .await?
            .into_iter()
            .map(StoredEvent::from)
            .collect(),
    };

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_query_recent_dispatches_on_kind() {
        let mut repo = MockEventRepository::new();

        repo.expect_recent_visits()
            .withf(|limit| *limit == 5)
            .times(1)
            .returning(|_| Ok(vec![Visit::new(1, "/about".to_string(), Utc::now())]));
        repo.expect_recent_clicks().never();

        let events = query_recent(&repo, EventKind::Visit, 5).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Visit);
    }
}
