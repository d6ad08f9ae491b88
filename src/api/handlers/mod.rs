//! HTTP request handlers for API endpoints.

pub mod analytics;
pub mod clicks;
pub mod events;
pub mod health;
pub mod pages;
pub mod route_list;
pub mod visits;

pub use analytics::analytics_handler;
pub use clicks::{click_summary_handler, list_clicks_handler, track_click_handler};
pub use events::list_events_handler;
pub use health::health_handler;
pub use pages::page_handler;
pub use route_list::route_list_handler;
pub use visits::list_visits_handler;
