//! Route table.
//!
//! Exact-path routes are tried first; everything else falls through to the
//! static asset directory and finally to the JSON 404 handler. A known path
//! requested with the wrong method is answered like an unknown path.

use axum::{handler::HandlerWithoutStateExt, routing::get, Router};
use tower_http::services::ServeDir;

use crate::context::ServerContext;
use crate::http::handlers;

pub const HEALTH: &str = "/health";
pub const INDEX: &str = "/";
pub const INFO: &str = "/api/info";

/// Routes and static fallback, without middleware.
pub fn service_routes(ctx: &ServerContext) -> Router<ServerContext> {
    let assets = ServeDir::new(ctx.static_root())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        .route(HEALTH, get(handlers::health))
        .route(INDEX, get(handlers::index))
        .route(INFO, get(handlers::info))
        .method_not_allowed_fallback(handlers::not_found)
        .fallback_service(assets)
}
