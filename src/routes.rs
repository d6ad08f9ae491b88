//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `/button-clicks`, `/visits`, `/analytics`, `/routes` - JSON API
//! - `/hello`, `/about`, ... - Visit-tracked pages
//! - `/health` - Storage and sink queue status
//! - `/dashboard` - Web UI
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on click ingestion
//! - **CORS** - Optional, for dashboards served from another origin
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::rate_limit::{self, RateLimitSettings};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router-level switches taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// `"*"` or a single origin. `None` disables CORS.
    pub cors_allowed_origin: Option<String>,
    /// Per-IP limit on `POST /button-clicks`. `None` disables it.
    pub rate_limit: Option<RateLimitSettings>,
}

/// Builds the routes with their state but without outer middleware.
///
/// The rate limiter keys on the peer address, so a router built with
/// `rate_limit` set must be served with connect info.
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let limiter = options.rate_limit.and_then(rate_limit::ingest_layer);

    let router = Router::new()
        .merge(api::routes::routes(limiter))
        .merge(web::routes::routes())
        .with_state(state);

    match cors::layer(options.cors_allowed_origin.as_deref()) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `options` - CORS and rate limiting switches
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    let router = build_router(state, options).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
