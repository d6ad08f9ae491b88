//! Cross-origin access for browser dashboards served elsewhere.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS layer for the configured origin.
///
/// `"*"` allows any origin. A single origin such as
/// `https://dash.example.com` is allowed verbatim. `None` disables CORS
/// (same-origin requests only), as does an origin that is not a valid header
/// value.
pub fn layer(allowed_origin: Option<&str>) -> Option<CorsLayer> {
    let origin = match allowed_origin?.trim() {
        "" => return None,
        "*" => AllowOrigin::any(),
        value => match value.parse::<HeaderValue>() {
            Ok(header) => AllowOrigin::exact(header),
            Err(_) => {
                tracing::warn!(origin = %value, "Ignoring invalid CORS origin");
                return None;
            }
        },
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
    )
}
