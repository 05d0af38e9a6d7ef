//! Cross-cutting HTTP layers shared by both servers.
//!
//! - `TraceLayer` - one span per request
//! - `TimeoutLayer` - answers 408 once `server.request_timeout_secs` elapses
//! - `CorsLayer` - origins from `server.cors_origins`, permissive when unset

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Wraps a router with tracing, timeout and CORS layers.
pub fn with_common_layers(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(cors_layer(&config.cors_origins_list()))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the given origins; any origin when the list is empty.
///
/// Origins that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
