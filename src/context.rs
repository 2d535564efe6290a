//! Immutable per-process server context.
//!
//! Created once at startup and cloned into every handler through axum state.
//! Nothing in here changes after construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::schema::DEFAULT_MAX_BODY_SIZE;
use crate::config::EdgeConfig;
use crate::http::payload::ServiceInfo;

/// Whether fault details may be exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// Only an explicit "development" environment enables development mode.
    pub fn from_environment(environment: Option<&str>) -> Self {
        match environment {
            Some(env) if env.eq_ignore_ascii_case("development") => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    pub fn exposes_fault_detail(self) -> bool {
        self == RuntimeMode::Development
    }
}

#[derive(Debug)]
struct Inner {
    started_at: Instant,
    static_root: PathBuf,
    mode: RuntimeMode,
    environment: String,
    max_body_size: usize,
    service_info: ServiceInfo,
}

/// Shared, read-only state handed to every request handler.
#[derive(Debug, Clone)]
pub struct ServerContext {
    inner: Arc<Inner>,
}

impl ServerContext {
    pub fn new(static_root: impl Into<PathBuf>, mode: RuntimeMode, environment: impl Into<String>) -> Self {
        Self::build(static_root.into(), mode, environment.into(), DEFAULT_MAX_BODY_SIZE)
    }

    /// Build the context for a loaded configuration.
    pub fn from_config(config: &EdgeConfig) -> Self {
        let runtime = &config.runtime;
        Self::build(
            PathBuf::from(&runtime.static_root),
            RuntimeMode::from_environment(runtime.environment.as_deref()),
            runtime.environment_name().to_string(),
            config.security.max_body_size,
        )
    }

    fn build(static_root: PathBuf, mode: RuntimeMode, environment: String, max_body_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                started_at: Instant::now(),
                static_root,
                mode,
                environment,
                max_body_size,
                service_info: ServiceInfo::tedgit(),
            }),
        }
    }

    /// Seconds since the context was created. Never decreases.
    pub fn uptime_secs(&self) -> f64 {
        self.inner.started_at.elapsed().as_secs_f64()
    }

    pub fn static_root(&self) -> &Path {
        &self.inner.static_root
    }

    pub fn mode(&self) -> RuntimeMode {
        self.inner.mode
    }

    pub fn environment(&self) -> &str {
        &self.inner.environment
    }

    /// Request body cap in bytes.
    pub fn max_body_size(&self) -> usize {
        self.inner.max_body_size
    }

    pub fn service_info(&self) -> &ServiceInfo {
        &self.inner.service_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_requires_explicit_flag() {
        assert_eq!(RuntimeMode::from_environment(None), RuntimeMode::Production);
        assert_eq!(RuntimeMode::from_environment(Some("staging")), RuntimeMode::Production);
        assert_eq!(
            RuntimeMode::from_environment(Some("development")),
            RuntimeMode::Development
        );
    }

    #[test]
    fn unset_environment_reports_development_but_hides_detail() {
        let ctx = ServerContext::from_config(&EdgeConfig::default());
        assert_eq!(ctx.environment(), "development");
        assert!(!ctx.mode().exposes_fault_detail());
    }

    #[test]
    fn uptime_is_monotonic() {
        let ctx = ServerContext::new("public", RuntimeMode::Production, "test");
        let first = ctx.uptime_secs();
        let second = ctx.uptime_secs();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
