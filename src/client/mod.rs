//! Dashboard client for the reporting API.
//!
//! [`Dashboard`] reads from a [`ReportingClient`] and, when the backend cannot
//! be reached, from a [`FallbackDataProvider`]. Both paths feed the same
//! aggregation functions as the server.
//!
//! # Modules
//!
//! - [`reporting`] - HTTP access to the reporting and ingestion endpoints
//! - [`fallback`] - Simulated data and the offline click log
//! - [`dashboard`] - Snapshot assembly and click submission

pub mod dashboard;
pub mod fallback;
pub mod reporting;

pub use dashboard::{ClickOutcome, ConnectionStatus, Dashboard, DashboardSnapshot};
pub use fallback::{FallbackDataProvider, SimulatedDataProvider};
pub use reporting::{ClickRequest, ClientError, HttpReportingClient, ReportingClient};

#[cfg(test)]
pub use reporting::MockReportingClient;
