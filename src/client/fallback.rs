//! Data shown when the backend cannot be reached.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entities::{Click, Visit};
use crate::domain::route_catalog::{DEMO_BUTTONS, TRACKED_ROUTES};

/// Source of raw events for offline rendering.
///
/// Kept separate from [`super::ReportingClient`] so the dashboard can be
/// tested against a fixed fallback.
pub trait FallbackDataProvider: Send + Sync {
    /// Visits to display while disconnected.
    fn visits(&self) -> Vec<Visit>;

    /// Clicks to display while disconnected, including offline ones.
    fn clicks(&self) -> Vec<Click>;

    /// Keeps a click the backend could not accept.
    fn record_click(&self, button_id: &str, username: &str, at: DateTime<Utc>) -> Click;

    /// Clicks kept by [`Self::record_click`], oldest first.
    fn offline_clicks(&self) -> Vec<Click>;
}

/// Seeded synthetic history plus a local click log.
///
/// The same seed and anchor time always produce the same history.
pub struct SimulatedDataProvider {
    visits: Vec<Visit>,
    clicks: Vec<Click>,
    offline: Mutex<Vec<Click>>,
}

impl SimulatedDataProvider {
    /// Number of synthetic visits generated.
    pub const VISITS: usize = 40;
    /// Number of synthetic clicks generated.
    pub const CLICKS: usize = 15;

    /// Generates a week of activity ending at `now`.
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let week_secs = Duration::days(7).num_seconds();

        let mut visits: Vec<Visit> = (0..Self::VISITS)
            .map(|i| {
                let route = &TRACKED_ROUTES[rng.random_range(0..TRACKED_ROUTES.len())];
                let ago = Duration::seconds(rng.random_range(0..week_secs));
                Visit::new(i as i64 + 1, route.path.to_string(), now - ago)
            })
            .collect();

        let mut clicks: Vec<Click> = (0..Self::CLICKS)
            .map(|i| {
                let button = DEMO_BUTTONS[rng.random_range(0..DEMO_BUTTONS.len())];
                let ago = Duration::seconds(rng.random_range(0..week_secs));
                Click::new(
                    i as i64 + 1,
                    button.to_string(),
                    "guest".to_string(),
                    now - ago,
                )
            })
            .collect();

        visits.sort_by_key(|v| std::cmp::Reverse(v.timestamp));
        clicks.sort_by_key(|c| std::cmp::Reverse(c.timestamp));

        Self {
            visits,
            clicks,
            offline: Mutex::new(Vec::new()),
        }
    }

    fn offline_log(&self) -> std::sync::MutexGuard<'_, Vec<Click>> {
        self.offline.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FallbackDataProvider for SimulatedDataProvider {
    fn visits(&self) -> Vec<Visit> {
        self.visits.clone()
    }

    fn clicks(&self) -> Vec<Click> {
        let mut clicks: Vec<Click> = self.offline_log().clone();
        clicks.extend(self.clicks.iter().cloned());
        clicks.sort_by_key(|c| std::cmp::Reverse(c.timestamp));
        clicks
    }

    fn record_click(&self, button_id: &str, username: &str, at: DateTime<Utc>) -> Click {
        let mut log = self.offline_log();
        // Offline ids are negative so they never collide with store ids.
        let click = Click::new(
            -(log.len() as i64) - 1,
            button_id.to_string(),
            username.to_string(),
            at,
        );
        log.push(click.clone());
        click
    }

    fn offline_clicks(&self) -> Vec<Click> {
        self.offline_log().clone()
    }
}
