//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by method, status
//! - `edge_request_duration_seconds` (histogram): latency distribution
//! - `edge_in_flight_requests` (gauge): requests currently being served
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; it is a no-op until a
//!   recorder is installed
//! - The Prometheus exporter only runs when an address is configured

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("edge_requests_total", &labels).increment(1);
    metrics::histogram!("edge_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Publish the current in-flight request count.
pub fn set_in_flight(count: u64) {
    metrics::gauge!("edge_in_flight_requests").set(count as f64);
}

/// Middleware recording request count and latency.
pub async fn record_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
