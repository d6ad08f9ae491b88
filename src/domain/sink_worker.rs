//! Fire-and-forget forwarding of tracked events to the analytics sink.
//!
//! Request handlers hold a [`SinkDispatcher`] and call
//! [`SinkDispatcher::dispatch`], which never awaits. The background
//! [`run_sink_worker`] drains the channel and talks to the sink with a
//! per-attempt timeout and bounded retries. Nothing it does can fail or stall
//! the request that produced the event.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::sink_event::SinkEvent;
use crate::infrastructure::sink::{AnalyticsSink, SinkError, SinkResult};

/// Non-blocking handle for queueing sink events.
#[derive(Debug, Clone)]
pub struct SinkDispatcher {
    tx: mpsc::Sender<SinkEvent>,
}

impl SinkDispatcher {
    pub fn new(tx: mpsc::Sender<SinkEvent>) -> Self {
        Self { tx }
    }

    /// Creates a dispatcher together with the receiver the worker consumes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SinkEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Queues an event without waiting.
    ///
    /// Returns `false` if the event was dropped because the queue is full or
    /// the worker has stopped.
    pub fn dispatch(&self, event: SinkEvent) -> bool {
        let name = event.name();
        match self.tx.try_send(event) {
            Ok(()) => {
                metrics::counter!("sink_events_dispatched_total", "event" => name).increment(1);
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(event = name, "Sink queue full, dropping event");
                metrics::counter!("sink_events_dropped_total", "event" => name).increment(1);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(event = name, "Sink worker stopped, dropping event");
                metrics::counter!("sink_events_dropped_total", "event" => name).increment(1);
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots currently available in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

/// Delivery tuning for the sink worker.
#[derive(Debug, Clone, Copy)]
pub struct SinkWorkerSettings {
    /// Upper bound for a single send attempt.
    pub timeout: Duration,
    /// Retries after the first failed attempt.
    pub max_retries: usize,
    /// Maximum sends in flight at once.
    pub concurrency: usize,
}

impl Default for SinkWorkerSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(2000),
            max_retries: 2,
            concurrency: 4,
        }
    }
}

/// Sends one event, retrying on failure.
///
/// Errors are logged and counted here; the return value is informational.
pub async fn deliver(
    sink: &dyn AnalyticsSink,
    event: &SinkEvent,
    settings: &SinkWorkerSettings,
) -> SinkResult<()> {
    let timeout = settings.timeout;
    let timeout_ms = timeout.as_millis() as u64;

    let strategy = ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(settings.max_retries);

    let result = Retry::start(strategy, || async move {
        match tokio::time::timeout(timeout, sink.send(event)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SinkError::Timeout(timeout_ms)),
        }
    })
    .await;

    match &result {
        Ok(()) => {
            debug!(sink = sink.name(), event = event.name(), "Event forwarded");
            metrics::counter!("sink_events_sent_total", "event" => event.name()).increment(1);
        }
        Err(e) => {
            warn!(
                sink = sink.name(),
                event = event.name(),
                "Failed to forward event: {}",
                e
            );
            metrics::counter!("sink_events_failed_total", "event" => event.name()).increment(1);
        }
    }

    result
}

/// Drains the sink queue until every dispatcher is dropped.
///
/// Sends run as detached tasks, at most `settings.concurrency` at a time.
/// In-flight sends are awaited before the worker returns.
pub async fn run_sink_worker(
    mut rx: mpsc::Receiver<SinkEvent>,
    sink: Arc<dyn AnalyticsSink>,
    settings: SinkWorkerSettings,
) {
    let concurrency = settings.concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    info!(sink = sink.name(), concurrency, "Sink worker started");

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let sink = sink.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let _ = deliver(sink.as_ref(), &event, &settings).await;
        });
    }

    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Sink worker stopped");
}
