//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, body cap, grace period)
//! - Check that origins and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::EdgeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,
    #[error("listener.host is empty")]
    EmptyHost,
    #[error("runtime.static_root is empty")]
    EmptyStaticRoot,
    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
    #[error("runtime.shutdown_grace_secs must be greater than zero")]
    ZeroGracePeriod,
    #[error("cors.allowed_origins entry {0:?} is not a valid origin")]
    InvalidOrigin(String),
    #[error("cors.allowed_origins is empty; omit it to allow any origin")]
    EmptyOriginList,
    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.runtime.static_root.trim().is_empty() {
        errors.push(ValidationError::EmptyStaticRoot);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.runtime.shutdown_grace_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if let Some(origins) = &config.cors.allowed_origins {
        if origins.is_empty() {
            errors.push(ValidationError::EmptyOriginList);
        }
        for origin in origins {
            if origin.is_empty() || HeaderValue::from_str(origin).is_err() {
                errors.push(ValidationError::InvalidOrigin(origin.clone()));
            }
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
