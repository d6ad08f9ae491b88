//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::{DateTime, Utc};

use crate::domain::aggregate::{
    AggregatedView, ButtonShare, DashboardSummary, EndpointActivity, click_distribution,
};
use crate::domain::entities::Click;
use crate::domain::route_catalog::{DEMO_BUTTONS, Route, TRACKED_ROUTES};
use crate::error::AppError;
use crate::state::AppState;

/// Number of clicks listed under "Recent clicks".
const RECENT_CLICKS_SHOWN: i64 = 10;

/// Statistic card.
pub struct CardView {
    pub label: &'static str,
    pub value: String,
}

/// Row of the per-endpoint table.
pub struct EndpointRow {
    pub endpoint: String,
    pub hits: u64,
    pub last_visit: String,
}

/// Row of the recent clicks table.
pub struct ClickRow {
    pub button_id: String,
    pub username: String,
    pub at: String,
}

/// Row of the click distribution table.
pub struct ShareRow {
    pub button_id: String,
    pub count: u64,
    pub percentage: String,
}

/// Template for the analytics dashboard.
///
/// Renders `templates/dashboard.html` with:
/// - Statistic cards
/// - Per-endpoint activity
/// - Recent clicks and click distribution
/// - Test buttons posting to `/button-clicks`
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub cards: Vec<CardView>,
    pub routes: &'static [Route],
    pub endpoints: Vec<EndpointRow>,
    pub recent_clicks: Vec<ClickRow>,
    pub distribution: Vec<ShareRow>,
    pub test_buttons: [&'static str; 3],
    pub generated_at: String,
}

/// Renders the dashboard from the live event store.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// # Errors
///
/// Returns the JSON error envelope with 500 if the store cannot be read.
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let now = Utc::now();
    let report = state.reporting_service.analytics_report(now).await?;
    let clicks = state
        .reporting_service
        .list_recent_clicks(Some(RECENT_CLICKS_SHOWN))
        .await?;

    Ok(DashboardTemplate {
        cards: cards(&report.summary),
        routes: TRACKED_ROUTES,
        endpoints: report.endpoints.iter().map(endpoint_row).collect(),
        recent_clicks: clicks.iter().map(click_row).collect(),
        distribution: distribution_rows(&report.view),
        test_buttons: DEMO_BUTTONS,
        generated_at: format_time(Some(now)),
    })
}

fn distribution_rows(view: &AggregatedView) -> Vec<ShareRow> {
    click_distribution(view).iter().map(share_row).collect()
}

fn format_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}

fn cards(summary: &DashboardSummary) -> Vec<CardView> {
    vec![
        CardView {
            label: "Visits today",
            value: summary.visits_today.to_string(),
        },
        CardView {
            label: "Avg visits / day (7d)",
            value: summary.avg_visits_per_day.to_string(),
        },
        CardView {
            label: "Button clicks",
            value: summary.total_button_clicks.to_string(),
        },
        CardView {
            label: "Most recent visit",
            value: format_time(summary.most_recent_visit),
        },
    ]
}

fn endpoint_row(activity: &EndpointActivity) -> EndpointRow {
    EndpointRow {
        endpoint: activity.endpoint.clone(),
        hits: activity.hits,
        last_visit: format_time(activity.timestamps.first().copied()),
    }
}

fn click_row(click: &Click) -> ClickRow {
    ClickRow {
        button_id: click.button_id.clone(),
        username: click.username.clone(),
        at: format_time(Some(click.timestamp)),
    }
}

fn share_row(share: &ButtonShare) -> ShareRow {
    ShareRow {
        button_id: share.button_id.clone(),
        count: share.count,
        percentage: format!("{:.1}%", share.percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let ts = DateTime::parse_from_rfc3339("2026-03-01T10:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_time(Some(ts)), "2026-03-01 10:05:00 UTC");
        assert_eq!(format_time(None), "never");
    }

    #[test]
    fn test_template_renders_empty_state() {
        let page = DashboardTemplate {
            cards: cards(&DashboardSummary::default()),
            routes: TRACKED_ROUTES,
            endpoints: vec![],
            recent_clicks: vec![],
            distribution: vec![],
            test_buttons: DEMO_BUTTONS,
            generated_at: "now".to_string(),
        };

        let html = page.render().unwrap();

        assert!(html.contains("Visits today"));
        assert!(html.contains("test-button-2"));
        assert!(html.contains("/analytics-dashboard"));
        assert!(html.contains("No clicks yet"));
    }

    #[test]
    fn test_share_row_formats_percentage() {
        let row = share_row(&ButtonShare {
            button_id: "a".to_string(),
            count: 2,
            percentage: 66.7,
        });
        assert_eq!(row.percentage, "66.7%");
    }

    #[test]
    fn test_distribution_rows_follow_view_counts() {
        let view = AggregatedView {
            total_clicks: 4,
            per_button_click_counts: [("a".to_string(), 3), ("b".to_string(), 1)]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let rows = distribution_rows(&view);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].button_id, "a");
        assert_eq!(rows[0].percentage, "75.0%");
        assert_eq!(rows[1].percentage, "25.0%");
    }
}
