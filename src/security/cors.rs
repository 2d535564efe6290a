//! Cross-origin policy.
//!
//! Allows `GET` and `POST` with `Content-Type` and `Authorization` request
//! headers. Origins come from configuration; no list means any origin.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer for the configured origins.
///
/// Origins that are not valid header values are skipped with a warning;
/// validation rejects them before this point in normal startup.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match &config.allowed_origins {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
