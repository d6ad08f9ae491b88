//! Business logic services for the application layer.

pub mod reporting_service;
pub mod tracking_service;

pub use reporting_service::{AnalyticsReport, ClickSummary, ReportingService};
pub use tracking_service::{ClickSubmission, TrackingService};
