#![allow(dead_code)]

use analytics_tracker::application::services::reporting_service::DEFAULT_AGGREGATION_WINDOW;
use analytics_tracker::domain::entities::{Click, NewClick, NewVisit, Visit};
use analytics_tracker::domain::repositories::EventRepository;
use analytics_tracker::domain::sink_event::SinkEvent;
use analytics_tracker::domain::sink_worker::SinkDispatcher;
use analytics_tracker::error::AppError;
use analytics_tracker::infrastructure::persistence::MemoryEventRepository;
use analytics_tracker::routes::{RouterOptions, build_router};
use analytics_tracker::state::AppState;
use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Store whose every operation fails like an unreachable database.
pub struct FailingRepository;

fn unavailable() -> AppError {
    AppError::storage("Event store unavailable", json!({ "reason": "connection refused" }))
}

#[async_trait]
impl EventRepository for FailingRepository {
    async fn append_click(&self, _new_click: NewClick) -> Result<Click, AppError> {
        Err(unavailable())
    }

    async fn append_visit(&self, _new_visit: NewVisit) -> Result<Visit, AppError> {
        Err(unavailable())
    }

    async fn recent_clicks(&self, _limit: i64) -> Result<Vec<Click>, AppError> {
        Err(unavailable())
    }

    async fn recent_visits(&self, _limit: i64) -> Result<Vec<Visit>, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub fn state_with(
    repository: Arc<dyn EventRepository>,
    backend: &'static str,
) -> (AppState, mpsc::Receiver<SinkEvent>) {
    let (dispatcher, rx) = SinkDispatcher::channel(100);
    let state = AppState::new(
        repository,
        dispatcher,
        "guest".to_string(),
        DEFAULT_AGGREGATION_WINDOW,
        backend,
    );
    (state, rx)
}

pub fn create_test_state() -> (AppState, mpsc::Receiver<SinkEvent>) {
    state_with(Arc::new(MemoryEventRepository::new()), "memory")
}

pub fn create_failing_state() -> (AppState, mpsc::Receiver<SinkEvent>) {
    state_with(Arc::new(FailingRepository), "postgres")
}

/// Full router over the given state, without rate limiting or CORS.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, &RouterOptions::default())).unwrap()
}
