//! TedGit Web Service
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ listener ──▶ request id / trace ──▶ security headers + CORS
//!                                                        │
//!                                                        ▼
//!                         fault shaping ◀── body limit ◀─┘
//!                              │
//!                              ▼
//!          /health   /api/info   /   static assets   404 JSON
//! ```
//!
//! Configuration comes from the environment (`PORT`, `HOST`,
//! `ALLOWED_ORIGINS`, `APP_ENV`, ...). SIGINT/SIGTERM drain the server.

use std::process::ExitCode;

use tedgit_web::config::{self, EdgeConfig};
use tedgit_web::http::ShutdownOutcome;
use tedgit_web::lifecycle::{self, signals, Shutdown};
use tedgit_web::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(&EdgeConfig::default().observability);
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("tedgit-web v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        static_root = %config.runtime.static_root,
        grace_secs = config.runtime.shutdown_grace_secs,
        "Configuration loaded"
    );

    let (server, listener) = match lifecycle::start(&config).await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    tokio::spawn(signals::listen(shutdown.clone()));
    tracing::info!("Press Ctrl+C to stop the server");

    match server.run(listener, shutdown).await {
        Ok(ShutdownOutcome::Drained) => {
            tracing::info!("Process terminated");
            ExitCode::SUCCESS
        }
        Ok(ShutdownOutcome::GraceExpired { .. }) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
