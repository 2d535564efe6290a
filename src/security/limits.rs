//! Request size limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//!
//! # Design Decisions
//! - Declared `Content-Length` over the cap is rejected before the body is read
//! - Streaming bodies are cut off once they pass the cap
//! - The plain 413 from the layer is reshaped into JSON by `http::response`

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::SecurityConfig;

/// Body cap layer for the configured size.
pub fn body_limit_layer(config: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.max_body_size)
}
