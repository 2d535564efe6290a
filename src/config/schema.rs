//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default request body cap: 10 MB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Environment name reported when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Runtime mode, static root and shutdown behaviour.
    pub runtime: RuntimeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8222,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the service. `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
}

impl CorsConfig {
    /// True when no allow-list has been configured.
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_none()
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Runtime behaviour.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Environment name. Only an explicit "development" exposes fault details.
    pub environment: Option<String>,

    /// Directory static assets are served from.
    pub static_root: String,

    /// Seconds to wait for in-flight requests after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

impl RuntimeConfig {
    /// Environment name as reported by `/health`.
    pub fn environment_name(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            environment: None,
            static_root: "public".to_string(),
            shutdown_grace_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Prometheus exporter bind address. Exporter is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
