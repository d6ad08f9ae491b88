//! Read-side service exposing raw and aggregated views.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::aggregate::{
    AggregatedView, ButtonShare, DashboardSummary, EndpointActivity, aggregate_parts,
    click_distribution, endpoint_activity, summarize,
};
use crate::domain::entities::{Click, EventKind, StoredEvent, Visit};
use crate::domain::repositories::{EventRepository, query_recent};
use crate::error::AppError;

/// Hard cap on records returned by the recent-activity listings.
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Default number of most-recent events fed to the aggregator.
pub const DEFAULT_AGGREGATION_WINDOW: i64 = 10_000;

/// Everything the analytics page needs in one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub view: AggregatedView,
    pub summary: DashboardSummary,
    pub endpoints: Vec<EndpointActivity>,
}

/// Click-only breakdown for the distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickSummary {
    pub total_clicks: u64,
    pub per_button_click_counts: BTreeMap<String, u64>,
    pub clicks_by_day: BTreeMap<NaiveDate, u64>,
    pub most_recent_event: Option<DateTime<Utc>>,
    pub distribution: Vec<ButtonShare>,
}

/// Clamps a caller-supplied limit into `1..=MAX_RECENT_LIMIT`.
///
/// `None` means "as many as allowed".
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(MAX_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT)
}

/// Service computing reports from the event store.
///
/// Views are recomputed on every call from the most recent
/// `aggregation_window` events of each kind.
pub struct ReportingService<R: EventRepository + ?Sized> {
    repository: Arc<R>,
    aggregation_window: i64,
}

impl<R: EventRepository + ?Sized> ReportingService<R> {
    /// Creates a new reporting service.
    pub fn new(repository: Arc<R>, aggregation_window: i64) -> Self {
        Self {
            repository,
            aggregation_window: aggregation_window.max(1),
        }
    }

    /// Most recent clicks, newest first, never more than [`MAX_RECENT_LIMIT`].
    pub async fn list_recent_clicks(&self, limit: Option<i64>) -> Result<Vec<Click>, AppError> {
        self.repository.recent_clicks(clamp_limit(limit)).await
    }

    /// Most recent visits, newest first, never more than [`MAX_RECENT_LIMIT`].
    pub async fn list_recent_visits(&self, limit: Option<i64>) -> Result<Vec<Visit>, AppError> {
        self.repository.recent_visits(clamp_limit(limit)).await
    }

    /// Most recent events of one kind, newest first.
    pub async fn list_recent(
        &self,
        kind: EventKind,
        limit: Option<i64>,
    ) -> Result<Vec<StoredEvent>, AppError> {
        query_recent(self.repository.as_ref(), kind, clamp_limit(limit)).await
    }

    /// Aggregated view over both record kinds.
    pub async fn aggregated_view(&self) -> Result<AggregatedView, AppError> {
        let (visits, clicks) = self.window().await?;
        Ok(aggregate_parts(&visits, &clicks))
    }

    /// Aggregated view, dashboard cards and per-endpoint activity.
    pub async fn analytics_report(&self, now: DateTime<Utc>) -> Result<AnalyticsReport, AppError> {
        let (visits, clicks) = self.window().await?;

        Ok(AnalyticsReport {
            view: aggregate_parts(&visits, &clicks),
            summary: summarize(&visits, &clicks, now),
            endpoints: endpoint_activity(&visits),
        })
    }

    /// Per-button counts and chart slices.
    pub async fn click_summary(&self) -> Result<ClickSummary, AppError> {
        let clicks = self.repository.recent_clicks(self.aggregation_window).await?;
        let view = aggregate_parts(&[], &clicks);
        let distribution = click_distribution(&view);

        Ok(ClickSummary {
            total_clicks: view.total_clicks,
            per_button_click_counts: view.per_button_click_counts,
            clicks_by_day: view.clicks_by_day,
            most_recent_event: view.most_recent_event,
            distribution,
        })
    }

    async fn window(&self) -> Result<(Vec<Visit>, Vec<Click>), AppError> {
        let visits = self.repository.recent_visits(self.aggregation_window).await?;
        let clicks = self.repository.recent_clicks(self.aggregation_window).await?;
        Ok((visits, clicks))
    }
}
