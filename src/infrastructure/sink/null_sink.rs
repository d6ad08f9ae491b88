//! No-op sink used when forwarding is not configured.

use async_trait::async_trait;
use tracing::debug;

use super::service::{AnalyticsSink, SinkResult};
use crate::domain::sink_event::SinkEvent;

/// A sink that drops every event.
///
/// # Use Cases
///
/// - Development environments without analytics credentials
/// - Tests that exercise the ingestion path without network access
pub struct NullSink;

impl NullSink {
    /// Creates a new NullSink instance.
    pub fn new() -> Self {
        debug!("Using NullSink (event forwarding disabled)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsSink for NullSink {
    async fn send(&self, event: &SinkEvent) -> SinkResult<()> {
        debug!(event = event.name(), "NullSink discarding event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
