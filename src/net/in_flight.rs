//! In-flight request tracking for graceful shutdown.
//!
//! # Responsibilities
//! - Count requests currently being served
//! - Let the shutdown path wait for the count to reach zero
//! - Publish the count as a gauge

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, extract::State, middleware::Next, response::Response};

use crate::observability::metrics;

/// Interval between checks while waiting for the server to go idle.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Shared counter of requests currently in progress.
#[derive(Debug, Clone, Default)]
pub struct InFlightTracker {
    active: Arc<AtomicU64>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request. Returns a guard that decrements on drop.
    pub fn track(&self) -> InFlightGuard {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::set_in_flight(now);
        InFlightGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Current number of requests in progress.
    pub fn active_count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait until no request is in progress.
    pub async fn wait_idle(&self) {
        while self.active_count() > 0 {
            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }
}

/// Guard held for the lifetime of one request.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let now = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::set_in_flight(now);
    }
}

/// Middleware holding an [`InFlightGuard`] until the response is produced.
pub async fn track_in_flight(
    State(tracker): State<InFlightTracker>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = tracker.track();
    next.run(request).await
}
