//! Click and visit ingestion service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Click, NewClick, NewVisit, Visit};
use crate::domain::repositories::EventRepository;
use crate::domain::sink_event::SinkEvent;
use crate::domain::sink_worker::SinkDispatcher;
use crate::error::AppError;

/// Default display name for clicks submitted without a username.
pub const DEFAULT_GUEST_USERNAME: &str = "guest";

/// A click as submitted by a client, before validation and defaults.
#[derive(Debug, Clone, Default)]
pub struct ClickSubmission {
    pub button_id: Option<String>,
    pub username: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Service recording clicks and visits.
///
/// Validates input, applies defaults, writes through the event store and then
/// hands a copy of the event to the sink dispatcher. Dispatch is
/// fire-and-forget: once the write succeeds the event counts as tracked.
pub struct TrackingService<R: EventRepository + ?Sized> {
    repository: Arc<R>,
    dispatcher: SinkDispatcher,
    guest_username: String,
}

impl<R: EventRepository + ?Sized> TrackingService<R> {
    /// Creates a new tracking service.
    pub fn new(repository: Arc<R>, dispatcher: SinkDispatcher, guest_username: String) -> Self {
        Self {
            repository,
            dispatcher,
            guest_username,
        }
    }

    /// The sentinel stored for clicks without a username.
    pub fn guest_username(&self) -> &str {
        &self.guest_username
    }

    /// Records a button click.
    ///
    /// # Defaults
    ///
    /// - Missing or blank `username` becomes the guest sentinel
    /// - Non-blank values are stored exactly as submitted
    /// - Missing `timestamp` becomes the store's current time
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `buttonId` is missing or blank.
    /// Nothing is stored in that case.
    /// Returns [`AppError::StorageUnavailable`] if the write fails.
    pub async fn track_click(&self, submission: ClickSubmission) -> Result<Click, AppError> {
        let new_click = self.prepare_click(submission)?;

        let click = self.repository.append_click(new_click).await?;
        metrics::counter!("clicks_tracked_total").increment(1);
        debug!(button_id = %click.button_id, id = click.id, "Click tracked");

        self.dispatcher.dispatch(SinkEvent::ButtonClick {
            button_id: click.button_id.clone(),
            username: click.username.clone(),
        });

        Ok(click)
    }

    /// Records a visit to a tracked route.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if the write fails.
    pub async fn track_visit(&self, endpoint: &str) -> Result<Visit, AppError> {
        let visit = self.repository.append_visit(NewVisit::new(endpoint)).await?;
        metrics::counter!("visits_tracked_total").increment(1);
        debug!(endpoint = %visit.endpoint, id = visit.id, "Visit tracked");

        self.dispatcher.dispatch(SinkEvent::PageView {
            page_location: visit.endpoint.clone(),
        });

        Ok(visit)
    }

    /// Reports that the route list was served. Nothing is stored.
    pub fn track_route_listing(&self, route_count: usize) {
        self.dispatcher
            .dispatch(SinkEvent::RouteListView { route_count });
    }

    fn prepare_click(&self, submission: ClickSubmission) -> Result<NewClick, AppError> {
        let button_id = submission
            .button_id
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| {
                AppError::bad_request("buttonId is required", json!({ "field": "buttonId" }))
            })?;

        let username = submission
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.guest_username.clone());

        Ok(NewClick {
            button_id,
            username,
            timestamp: submission.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockEventRepository;
    use tokio::sync::mpsc;

    fn service(
        repo: MockEventRepository,
    ) -> (
        TrackingService<MockEventRepository>,
        mpsc::Receiver<SinkEvent>,
    ) {
        let (dispatcher, rx) = SinkDispatcher::channel(16);
        (
            TrackingService::new(
                Arc::new(repo),
                dispatcher,
                DEFAULT_GUEST_USERNAME.to_string(),
            ),
            rx,
        )
    }

    fn echo_click(new_click: NewClick) -> Result<Click, AppError> {
        Ok(Click::new(
            1,
            new_click.button_id,
            new_click.username,
            new_click.timestamp.unwrap_or_else(Utc::now),
        ))
    }

    #[tokio::test]
    async fn test_track_click_defaults_username() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click()
            .withf(|c| c.button_id == "export-data-btn" && c.username == "guest")
            .times(1)
            .returning(echo_click);

        let (service, mut rx) = service(repo);

        let click = service
            .track_click(ClickSubmission {
                button_id: Some("export-data-btn".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(click.username, "guest");
        assert_eq!(
            rx.try_recv().unwrap(),
            SinkEvent::ButtonClick {
                button_id: "export-data-btn".to_string(),
                username: "guest".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_blank_username_becomes_guest() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click()
            .withf(|c| c.username == "guest")
            .times(1)
            .returning(echo_click);

        let (service, _rx) = service(repo);

        let click = service
            .track_click(ClickSubmission {
                button_id: Some("b".to_string()),
                username: Some("   ".to_string()),
                timestamp: None,
            })
            .await
            .unwrap();

        assert_eq!(click.username, "guest");
    }

    #[tokio::test]
    async fn test_padded_values_stored_as_sent() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click()
            .withf(|c| c.button_id == " export-data-btn " && c.username == " alice ")
            .times(1)
            .returning(echo_click);

        let (service, _rx) = service(repo);

        let click = service
            .track_click(ClickSubmission {
                button_id: Some(" export-data-btn ".to_string()),
                username: Some(" alice ".to_string()),
                timestamp: None,
            })
            .await
            .unwrap();

        assert_eq!(click.button_id, " export-data-btn ");
    }

    #[tokio::test]
    async fn test_missing_button_id_never_reaches_store() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click().never();

        let (service, mut rx) = service(repo);

        let result = service.track_click(ClickSubmission::default()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_storage_failure_skips_sink() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click()
            .times(1)
            .returning(|_| Err(AppError::storage("down", json!({}))));

        let (service, mut rx) = service(repo);

        let result = service
            .track_click(ClickSubmission {
                button_id: Some("b".to_string()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::StorageUnavailable { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_click_succeeds_when_sink_queue_is_gone() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_click().times(1).returning(echo_click);

        let (service, rx) = service(repo);
        drop(rx);

        let result = service
            .track_click(ClickSubmission {
                button_id: Some("b".to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_track_visit_dispatches_page_view() {
        let mut repo = MockEventRepository::new();
        repo.expect_append_visit()
            .withf(|v| v.endpoint == "/about")
            .times(1)
            .returning(|v| Ok(Visit::new(3, v.endpoint, Utc::now())));

        let (service, mut rx) = service(repo);

        let visit = service.track_visit("/about").await.unwrap();

        assert_eq!(visit.endpoint, "/about");
        assert_eq!(
            rx.try_recv().unwrap(),
            SinkEvent::PageView {
                page_location: "/about".to_string()
            }
        );
    }
}
