//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, security headers, limits)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown, bounded by the grace period

use std::future::IntoFuture;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::Span;

use crate::config::EdgeConfig;
use crate::context::ServerContext;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::http::response::{panic_response, shape_faults};
use crate::http::routes::service_routes;
use crate::lifecycle::{LifecycleState, Shutdown};
use crate::net::in_flight::{track_in_flight, InFlightTracker};
use crate::observability::metrics;
use crate::security::{body_limit_layer, cors_layer, security_headers};

/// Error type for the serve loop.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How the serve loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished.
    Drained,
    /// The grace period ran out with requests still in flight.
    GraceExpired { in_flight: u64 },
}

/// HTTP edge server.
pub struct EdgeServer {
    router: Router,
    context: ServerContext,
    tracker: InFlightTracker,
    grace: Duration,
}

impl EdgeServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &EdgeConfig) -> Self {
        let context = ServerContext::from_config(config);
        let routes = service_routes(&context);
        Self::with_routes(config, context, routes)
    }

    /// Create a server around a custom route table.
    ///
    /// The full middleware stack is applied on top of `routes`.
    pub fn with_routes(config: &EdgeConfig, context: ServerContext, routes: Router<ServerContext>) -> Self {
        let tracker = InFlightTracker::new();
        let router = build_router(config, context.clone(), tracker.clone(), routes);
        Self {
            router,
            context,
            tracker,
            grace: Duration::from_secs(config.runtime.shutdown_grace_secs),
        }
    }

    /// The fully layered router. Cheap to clone.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        &self.tracker
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<ShutdownOutcome, ServerError> {
        let addr = listener.local_addr()?;
        shutdown.advance(LifecycleState::Running);
        tracing::info!(address = %addr, "HTTP server running");

        let stop_accepting = {
            let shutdown = shutdown.clone();
            async move { shutdown.triggered().await }
        };
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(stop_accepting)
            .into_future();
        tokio::pin!(serve);

        let finished_early = tokio::select! {
            result = &mut serve => Some(result),
            _ = shutdown.triggered() => None,
        };

        let outcome = match finished_early {
            Some(result) => {
                result?;
                ShutdownOutcome::Drained
            }
            None => {
                tracing::info!(
                    in_flight = self.tracker.active_count(),
                    grace_secs = self.grace.as_secs(),
                    "Draining in-flight requests"
                );
                let tracker = self.tracker.clone();
                let drain = async move {
                    (&mut serve).await?;
                    tracker.wait_idle().await;
                    Ok::<(), std::io::Error>(())
                };
                match tokio::time::timeout(self.grace, drain).await {
                    Ok(result) => {
                        result?;
                        ShutdownOutcome::Drained
                    }
                    Err(_) => ShutdownOutcome::GraceExpired {
                        in_flight: self.tracker.active_count(),
                    },
                }
            }
        };

        shutdown.advance(LifecycleState::Stopped);
        match outcome {
            ShutdownOutcome::Drained => tracing::info!("HTTP server stopped"),
            ShutdownOutcome::GraceExpired { in_flight } => {
                tracing::warn!(in_flight, "Grace period expired, abandoning in-flight requests")
            }
        }
        Ok(outcome)
    }
}

/// Build the axum router with all middleware layers.
///
/// Layers listed later wrap the ones before them, so a request passes
/// through them bottom to top.
pub fn build_router(
    config: &EdgeConfig,
    context: ServerContext,
    tracker: InFlightTracker,
    routes: Router<ServerContext>,
) -> Router<()> {
    let router = routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(DefaultBodyLimit::max(config.security.max_body_size))
        .layer(body_limit_layer(&config.security))
        .layer(from_fn_with_state(context.clone(), shape_faults))
        .layer(cors_layer(&config.cors));

    let router = if config.security.enable_headers {
        router.layer(from_fn(security_headers))
    } else {
        router
    };

    router
        .layer(from_fn_with_state(tracker, track_in_flight))
        .layer(from_fn(metrics::record_requests))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
        .with_state(context)
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = request_id_of(request).unwrap_or("unknown"),
    )
}
