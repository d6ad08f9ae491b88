//! Analytics sink trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::sink_event::SinkEvent;

/// Errors that can occur while forwarding an event to the sink.
///
/// These never reach API callers; they are logged and counted by the worker.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink request failed: {0}")]
    Request(reqwest::Error),

    #[error("Sink rejected event with status {0}")]
    Rejected(u16),

    #[error("Sink request timed out after {0} ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for SinkError {
    /// Drops the request URL, whose query string carries the GA4 API secret.
    fn from(e: reqwest::Error) -> Self {
        SinkError::Request(e.without_url())
    }
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for copies of tracked events.
///
/// Forwarding is best-effort: callers go through
/// [`crate::domain::sink_worker::SinkDispatcher`], which never waits on the sink.
///
/// # Implementations
///
/// - [`crate::infrastructure::sink::Ga4Sink`] - GA4 Measurement Protocol
/// - [`crate::infrastructure::sink::NullSink`] - discards everything
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Sends one event.
    async fn send(&self, event: &SinkEvent) -> SinkResult<()>;

    /// Short label for logs and health output.
    fn name(&self) -> &'static str;
}
