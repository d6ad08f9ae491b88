//! Derived views computed from raw click and visit records.
//!
//! Everything here is a pure function of its input: no I/O, no hidden state,
//! deterministic output. Maps are `BTreeMap`s so serialised views are stable.
//!
//! Day bucketing always truncates to the **UTC** calendar date. An event
//! submitted as `2026-03-01T23:30:00-02:00` is `2026-03-02T01:30Z` and lands in
//! the `2026-03-02` bucket no matter where the client sits.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Click, StoredEvent, Visit};

/// Trailing window used for the average-visits-per-day card.
pub const AVERAGE_WINDOW_DAYS: i64 = 7;

/// Counts and groupings over a set of stored events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedView {
    pub total_hits: u64,
    pub per_endpoint_hits: BTreeMap<String, u64>,
    pub total_clicks: u64,
    pub per_button_click_counts: BTreeMap<String, u64>,
    /// Visits per UTC day.
    pub timestamps_by_day: BTreeMap<NaiveDate, u64>,
    /// Clicks per UTC day.
    pub clicks_by_day: BTreeMap<NaiveDate, u64>,
    pub most_recent_event: Option<DateTime<Utc>>,
}

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_visits: u64,
    pub visits_today: u64,
    pub total_button_clicks: u64,
    pub most_recent_visit: Option<DateTime<Utc>>,
    pub avg_visits_per_day: u64,
}

/// Hits and visit times for a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointActivity {
    pub endpoint: String,
    pub hits: u64,
    /// Newest first.
    pub timestamps: Vec<DateTime<Utc>>,
}

/// One slice of the click distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonShare {
    pub button_id: String,
    pub count: u64,
    /// Share of all clicks, in percent, rounded to one decimal.
    pub percentage: f64,
}

impl AggregatedView {
    fn add_visit(&mut self, visit: &Visit) {
        self.total_hits += 1;
        *self
            .per_endpoint_hits
            .entry(visit.endpoint.clone())
            .or_insert(0) += 1;
        *self
            .timestamps_by_day
            .entry(day_bucket(visit.timestamp))
            .or_insert(0) += 1;
        self.observe(visit.timestamp);
    }

    fn add_click(&mut self, click: &Click) {
        self.total_clicks += 1;
        *self
            .per_button_click_counts
            .entry(click.button_id.clone())
            .or_insert(0) += 1;
        *self
            .clicks_by_day
            .entry(day_bucket(click.timestamp))
            .or_insert(0) += 1;
        self.observe(click.timestamp);
    }

    fn observe(&mut self, ts: DateTime<Utc>) {
        self.most_recent_event = Some(match self.most_recent_event {
            Some(current) if current >= ts => current,
            _ => ts,
        });
    }
}

/// Truncates a timestamp to its UTC calendar date.
pub fn day_bucket(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Aggregates a mixed sequence of clicks and visits.
///
/// Empty input yields zero counts, empty maps and no `most_recent_event`.
pub fn aggregate<'a, I>(events: I) -> AggregatedView
where
    I: IntoIterator<Item = &'a StoredEvent>,
{
    let mut view = AggregatedView::default();
    for event in events {
        match event {
            StoredEvent::Click(c) => view.add_click(c),
            StoredEvent::Visit(v) => view.add_visit(v),
        }
    }
    view
}

/// Aggregates visits and clicks held in separate slices.
///
/// Produces the same view as [`aggregate`] over the concatenation of both.
pub fn aggregate_parts(visits: &[Visit], clicks: &[Click]) -> AggregatedView {
    let mut view = AggregatedView::default();
    visits.iter().for_each(|v| view.add_visit(v));
    clicks.iter().for_each(|c| view.add_click(c));
    view
}

/// Computes the dashboard headline cards relative to `now`.
pub fn summarize(visits: &[Visit], clicks: &[Click], now: DateTime<Utc>) -> DashboardSummary {
    let today = day_bucket(now);
    let window_start = now - Duration::days(AVERAGE_WINDOW_DAYS);

    let visits_today = visits
        .iter()
        .filter(|v| day_bucket(v.timestamp) == today)
        .count() as u64;

    let visits_in_window = visits
        .iter()
        .filter(|v| v.timestamp >= window_start)
        .count();

    DashboardSummary {
        total_visits: visits.len() as u64,
        visits_today,
        total_button_clicks: clicks.len() as u64,
        most_recent_visit: visits.iter().map(|v| v.timestamp).max(),
        avg_visits_per_day: (visits_in_window as f64 / AVERAGE_WINDOW_DAYS as f64).round() as u64,
    }
}

/// Groups visits by endpoint, busiest endpoint first.
pub fn endpoint_activity(visits: &[Visit]) -> Vec<EndpointActivity> {
    let mut grouped: BTreeMap<&str, Vec<DateTime<Utc>>> = BTreeMap::new();
    for visit in visits {
        grouped
            .entry(visit.endpoint.as_str())
            .or_default()
            .push(visit.timestamp);
    }

    let mut activity: Vec<EndpointActivity> = grouped
        .into_iter()
        .map(|(endpoint, mut timestamps)| {
            timestamps.sort_unstable_by(|a, b| b.cmp(a));
            EndpointActivity {
                endpoint: endpoint.to_string(),
                hits: timestamps.len() as u64,
                timestamps,
            }
        })
        .collect();

    // BTreeMap iteration already orders endpoints by name; a stable sort keeps that on ties.
    activity.sort_by(|a, b| b.hits.cmp(&a.hits));
    activity
}

/// Turns per-button counts into chart slices, largest first.
pub fn click_distribution(view: &AggregatedView) -> Vec<ButtonShare> {
    let total = view.total_clicks;

    let mut shares: Vec<ButtonShare> = view
        .per_button_click_counts
        .iter()
        .map(|(button_id, &count)| ButtonShare {
            button_id: button_id.clone(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                (count as f64 * 1000.0 / total as f64).round() / 10.0
            },
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
