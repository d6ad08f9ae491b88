//! External analytics forwarding.
//!
//! - [`service::AnalyticsSink`] - trait implemented by every sink
//! - [`Ga4Sink`] - Google Analytics 4 Measurement Protocol
//! - [`NullSink`] - used when no sink is configured

pub mod ga4_sink;
pub mod null_sink;
pub mod service;

pub use ga4_sink::{DEFAULT_GA4_ENDPOINT, Ga4Settings, Ga4Sink};
pub use null_sink::NullSink;
pub use service::{AnalyticsSink, SinkError, SinkResult};

#[cfg(test)]
pub use service::MockAnalyticsSink;
