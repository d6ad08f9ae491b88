//! Dashboard state assembled from the backend or the fallback provider.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::fallback::FallbackDataProvider;
use super::reporting::{ClickRequest, ClientError, ReportingClient};
use crate::application::services::tracking_service::DEFAULT_GUEST_USERNAME;
use crate::domain::aggregate::{
    AggregatedView, ButtonShare, DashboardSummary, aggregate_parts, click_distribution, summarize,
};
use crate::domain::entities::Click;

/// Default size of the recent activity list.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Whether the last refresh reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Everything a dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub status: ConnectionStatus,
    /// Set while disconnected; the data below is simulated then.
    pub error_banner: Option<String>,
    pub view: AggregatedView,
    pub summary: DashboardSummary,
    /// Newest first.
    pub recent_clicks: Vec<Click>,
    pub distribution: Vec<ButtonShare>,
}

/// What happened to a submitted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Stored by the backend.
    Tracked(Click),
    /// Backend unreachable; kept in the fallback click log.
    RecordedOffline(Click),
    /// Backend refused the click.
    Rejected(String),
}

/// Reporting client with an offline fallback.
pub struct Dashboard<R, F> {
    client: R,
    fallback: F,
    recent_limit: i64,
    guest_username: String,
}

impl<R: ReportingClient, F: FallbackDataProvider> Dashboard<R, F> {
    pub fn new(client: R, fallback: F) -> Self {
        Self {
            client,
            fallback,
            recent_limit: DEFAULT_RECENT_LIMIT,
            guest_username: DEFAULT_GUEST_USERNAME.to_string(),
        }
    }

    /// Overrides the size of the recent activity list.
    pub fn with_recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = limit.max(1);
        self
    }

    /// Name stored on offline clicks submitted without a username.
    pub fn with_guest_username(mut self, guest_username: impl Into<String>) -> Self {
        self.guest_username = guest_username.into();
        self
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Fetches a fresh snapshot, falling back to simulated data on failure.
    pub async fn refresh(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        match self.fetch_live().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Backend unavailable, showing fallback data: {}", e);
                self.offline_snapshot(now, &e)
            }
        }
    }

    /// Submits a click, then refreshes.
    ///
    /// The refreshed snapshot may or may not include the click if other
    /// writers are active; nothing orders the two requests.
    pub async fn click(
        &self,
        button_id: &str,
        username: Option<String>,
        now: DateTime<Utc>,
    ) -> (ClickOutcome, DashboardSnapshot) {
        let request = ClickRequest::new(button_id, username.clone());

        let outcome = match self.client.track_click(request).await {
            Ok(click) => {
                debug!(button_id = %click.button_id, id = click.id, "Click tracked");
                ClickOutcome::Tracked(click)
            }
            Err(e) if e.is_unreachable() => {
                warn!("Click kept offline: {}", e);
                let username = username
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or_else(|| self.guest_username.clone());
                ClickOutcome::RecordedOffline(self.fallback.record_click(button_id, &username, now))
            }
            Err(e) => ClickOutcome::Rejected(e.to_string()),
        };

        (outcome, self.refresh(now).await)
    }

    async fn fetch_live(&self) -> Result<DashboardSnapshot, ClientError> {
        let report = self.client.fetch_analytics().await?;
        let recent_clicks = self.client.fetch_recent_clicks(self.recent_limit).await?;
        let distribution = click_distribution(&report.view);

        Ok(DashboardSnapshot {
            status: ConnectionStatus::Connected,
            error_banner: None,
            view: report.view,
            summary: report.summary,
            recent_clicks,
            distribution,
        })
    }

    fn offline_snapshot(&self, now: DateTime<Utc>, error: &ClientError) -> DashboardSnapshot {
        let visits = self.fallback.visits();
        let clicks = self.fallback.clicks();

        let view = aggregate_parts(&visits, &clicks);
        let summary = summarize(&visits, &clicks, now);
        let distribution = click_distribution(&view);
        let recent_clicks = clicks
            .into_iter()
            .take(self.recent_limit as usize)
            .collect();

        DashboardSnapshot {
            status: ConnectionStatus::Disconnected,
            error_banner: Some(format!("Disconnected from server: {}", error)),
            view,
            summary,
            recent_clicks,
            distribution,
        }
    }
}
