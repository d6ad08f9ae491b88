//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ReportingService, TrackingService};
use crate::domain::repositories::EventRepository;
use crate::domain::sink_worker::SinkDispatcher;

/// Event store selected at startup.
pub type DynEventRepository = dyn EventRepository;

/// Application state cloned into each request.
///
/// Services are behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub tracking_service: Arc<TrackingService<DynEventRepository>>,
    pub reporting_service: Arc<ReportingService<DynEventRepository>>,
    pub repository: Arc<DynEventRepository>,
    pub sink_dispatcher: SinkDispatcher,
    /// Label of the active store backend, reported by the health check.
    pub storage_backend: &'static str,
}

impl AppState {
    /// Wires services around the given store and sink dispatcher.
    pub fn new(
        repository: Arc<DynEventRepository>,
        sink_dispatcher: SinkDispatcher,
        guest_username: String,
        aggregation_window: i64,
        storage_backend: &'static str,
    ) -> Self {
        let tracking_service = Arc::new(TrackingService::new(
            repository.clone(),
            sink_dispatcher.clone(),
            guest_username,
        ));
        let reporting_service = Arc::new(ReportingService::new(
            repository.clone(),
            aggregation_window,
        ));

        Self {
            tracking_service,
            reporting_service,
            repository,
            sink_dispatcher,
            storage_backend,
        }
    }
}
