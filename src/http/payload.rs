//! JSON payloads returned by the service endpoints.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ServerContext;

/// Value of the `status` field in a health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    #[serde(rename = "OK")]
    Ok,
}

/// Body of `GET /health`. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
    /// Seconds since process start.
    pub uptime: f64,
    pub environment: String,
}

impl HealthStatus {
    pub fn capture(ctx: &ServerContext) -> Self {
        Self {
            status: HealthState::Ok,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime: ctx.uptime_secs(),
            environment: ctx.environment().to_string(),
        }
    }
}

/// Paths advertised by `GET /api/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub health: String,
    pub main: String,
    pub info: String,
}

/// Body of `GET /api/info`. Constant for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Endpoints,
}

impl ServiceInfo {
    pub fn tedgit() -> Self {
        Self {
            name: "TedGit Web Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "A simple web service displaying Hello Ted!".to_string(),
            endpoints: Endpoints {
                health: super::routes::HEALTH.to_string(),
                main: super::routes::INDEX.to_string(),
                info: super::routes::INFO.to_string(),
            },
        }
    }
}
