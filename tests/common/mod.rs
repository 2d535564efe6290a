//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tedgit_web::config::EdgeConfig;
use tedgit_web::context::ServerContext;
use tedgit_web::http::routes::service_routes;
use tedgit_web::http::{EdgeServer, ServerError, ShutdownOutcome};
use tedgit_web::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Static asset directory shipped with the crate.
pub fn static_root() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string()
}

/// Default config pointed at the bundled assets, bound to loopback.
pub fn test_config(environment: Option<&str>) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.runtime.static_root = static_root();
    config.runtime.environment = environment.map(str::to_string);
    config
}

/// Server whose route table is the standard one plus `extra`.
pub fn server_with_extra_routes(config: &EdgeConfig, extra: Router<ServerContext>) -> EdgeServer {
    let context = ServerContext::from_config(config);
    let routes = service_routes(&context).merge(extra);
    EdgeServer::with_routes(config, context, routes)
}

pub struct Captured {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Drive one request through the router without a socket.
pub async fn send(router: Router, request: Request<Body>) -> Captured {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();
    Captured { status, headers, body }
}

pub async fn get(router: Router, path: &str) -> Captured {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, request).await
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<ShutdownOutcome, ServerError>>,
}

/// Bind an ephemeral port and run `server` in the background.
pub async fn spawn_server(server: EdgeServer) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });
    RunningServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that never goes through a proxy or reuses idle connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
