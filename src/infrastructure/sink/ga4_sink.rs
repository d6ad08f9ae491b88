//! Google Analytics 4 Measurement Protocol sink.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::service::{AnalyticsSink, SinkError, SinkResult};
use crate::domain::sink_event::SinkEvent;

/// Default Measurement Protocol collection endpoint.
pub const DEFAULT_GA4_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

/// Session id attached to every event; sessions are not tracked server-side.
const SESSION_ID: &str = "123";

/// Engagement time reported with every event, in milliseconds.
const ENGAGEMENT_TIME_MSEC: u64 = 100;

/// Connection settings for [`Ga4Sink`].
#[derive(Debug, Clone)]
pub struct Ga4Settings {
    pub endpoint: String,
    pub measurement_id: String,
    pub api_secret: String,
    pub client_id: String,
}

#[derive(Debug, Serialize)]
struct CollectPayload<'a> {
    client_id: &'a str,
    events: Vec<CollectEvent>,
}

#[derive(Debug, Serialize)]
struct CollectEvent {
    name: &'static str,
    params: Map<String, Value>,
}

/// Forwards events to GA4 via HTTP POST.
pub struct Ga4Sink {
    http: reqwest::Client,
    settings: Ga4Settings,
}

impl Ga4Sink {
    /// Creates a sink using the given HTTP client.
    ///
    /// Timeouts are enforced by the sink worker, not the client.
    pub fn new(http: reqwest::Client, settings: Ga4Settings) -> Self {
        Self { http, settings }
    }

    fn payload(&self, event: &SinkEvent) -> CollectPayload<'_> {
        let mut params = Map::new();
        params.insert("session_id".to_string(), Value::from(SESSION_ID));
        params.insert(
            "engagement_time_msec".to_string(),
            Value::from(ENGAGEMENT_TIME_MSEC),
        );
        params.extend(event.params());

        CollectPayload {
            client_id: &self.settings.client_id,
            events: vec![CollectEvent {
                name: event.name(),
                params,
            }],
        }
    }
}

#[async_trait]
impl AnalyticsSink for Ga4Sink {
    async fn send(&self, event: &SinkEvent) -> SinkResult<()> {
        let response = self
            .http
            .post(&self.settings.endpoint)
            .query(&[
                ("measurement_id", self.settings.measurement_id.as_str()),
                ("api_secret", self.settings.api_secret.as_str()),
            ])
            .json(&self.payload(event))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected(status.as_u16()));
        }

        debug!(event = event.name(), "Event sent to GA4");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ga4"
    }
}
