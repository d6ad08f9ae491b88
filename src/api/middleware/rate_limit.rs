//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP limiter layer type.
pub type IngestLimiter =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Token bucket parameters for the ingestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// One request slot is replenished every this many milliseconds.
    pub replenish_ms: u64,
    /// Requests a single client may send back to back.
    pub burst: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            replenish_ms: 200,
            burst: 50,
        }
    }
}

/// Creates a rate limiter for click ingestion.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Returns `None` when either setting is zero.
pub fn ingest_layer(settings: RateLimitSettings) -> Option<IngestLimiter> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(settings.replenish_ms)
        .burst_size(settings.burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_build_layer() {
        assert!(ingest_layer(RateLimitSettings::default()).is_some());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let settings = RateLimitSettings {
            replenish_ms: 1_000,
            burst: 0,
        };
        assert!(ingest_layer(settings).is_none());
    }
}
