//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::EventRepository`] trait
//! and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::tracking_service::TrackingService`] - Click and visit ingestion
//! - [`services::reporting_service::ReportingService`] - Recent listings and aggregated views

pub mod services;
