//! Startup orchestration.
//!
//! # Responsibilities
//! - Check the loaded configuration for risky settings
//! - Initialize the metrics exporter when configured
//! - Build the server and bind its listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::EdgeConfig;
use crate::context::RuntimeMode;
use crate::http::EdgeServer;
use crate::net::{self, ListenerError};
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Bind(#[from] ListenerError),
}

/// Prepare the server for `config` and bind its listener.
pub async fn start(config: &EdgeConfig) -> Result<(EdgeServer, TcpListener), StartupError> {
    let mode = RuntimeMode::from_environment(config.runtime.environment.as_deref());

    if config.cors.allows_any() && mode == RuntimeMode::Production {
        tracing::warn!("No ALLOWED_ORIGINS configured; CORS accepts requests from any origin");
    }

    let static_root = Path::new(&config.runtime.static_root);
    if !static_root.is_dir() {
        tracing::warn!(static_root = %static_root.display(), "Static root is not a directory");
    }

    if let Some(addr) = &config.observability.metrics_address {
        match addr.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(metrics_address = %addr, "Failed to parse metrics address"),
        }
    }

    let server = EdgeServer::new(config);
    let listener = net::bind(&config.listener).await?;
    let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
        address: config.listener.bind_address(),
        source,
    })?;

    tracing::info!("Server running at http://{}", local_addr);
    tracing::info!("Environment: {}", server.context().environment());

    Ok((server, listener))
}
