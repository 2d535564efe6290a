//! Startup and shutdown behaviour over real sockets.

use std::time::Duration;

use axum::{routing::get, Router};
use tedgit_web::context::ServerContext;
use tedgit_web::http::ShutdownOutcome;
use tedgit_web::lifecycle::{self, LifecycleState, StartupError};
use tokio::net::TcpListener;

mod common;
use common::{client, server_with_extra_routes, spawn_server, test_config};

fn slow_routes(delay: Duration) -> Router<ServerContext> {
    Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    )
}

#[tokio::test]
async fn serves_over_tcp_and_stops_on_trigger() {
    let server = server_with_extra_routes(&test_config(None), Router::new());
    let running = spawn_server(server).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(running.shutdown.state(), LifecycleState::Running);

    let res = client()
        .get(format!("http://{}/health", running.addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    running.shutdown.trigger();
    let outcome = tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    assert_eq!(outcome, ShutdownOutcome::Drained);
    assert_eq!(running.shutdown.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn in_flight_request_finishes_during_drain() {
    let config = test_config(None);
    let server = server_with_extra_routes(&config, slow_routes(Duration::from_millis(400)));
    let tracker = server.in_flight().clone();
    let running = spawn_server(server).await;
    let addr = running.addr;

    let request = tokio::spawn(async move {
        client().get(format!("http://{addr}/slow")).send().await
    });

    // Wait until the slow request is being served.
    tokio::time::timeout(Duration::from_secs(2), async {
        while tracker.active_count() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("slow request never arrived");

    running.shutdown.trigger();

    let res = request.await.unwrap().expect("in-flight request was dropped");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "done");

    let outcome = tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    assert_eq!(outcome, ShutdownOutcome::Drained);
    assert_eq!(tracker.active_count(), 0);
}

#[tokio::test]
async fn new_connections_refused_after_drain() {
    let server = server_with_extra_routes(&test_config(None), Router::new());
    let running = spawn_server(server).await;
    let addr = running.addr;

    running.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    let result = client().get(format!("http://{addr}/health")).send().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn grace_period_bounds_the_drain() {
    let mut config = test_config(None);
    config.runtime.shutdown_grace_secs = 1;
    let server = server_with_extra_routes(&config, slow_routes(Duration::from_secs(30)));
    let tracker = server.in_flight().clone();
    let running = spawn_server(server).await;
    let addr = running.addr;

    let _request = tokio::spawn(async move {
        let _ = client().get(format!("http://{addr}/slow")).send().await;
    });

    tokio::time::timeout(Duration::from_secs(2), async {
        while tracker.active_count() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("slow request never arrived");

    running.shutdown.trigger();
    let outcome = tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .expect("grace period was not enforced")
        .unwrap()
        .unwrap();
    assert_eq!(outcome, ShutdownOutcome::GraceExpired { in_flight: 1 });
    assert_eq!(running.shutdown.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn startup_binds_configured_address() {
    let config = test_config(Some("production"));
    let (server, listener) = lifecycle::start(&config).await.unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), 0);
    assert_eq!(server.context().environment(), "production");
}

#[tokio::test]
async fn startup_fails_when_port_taken() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = test_config(None);
    config.listener.port = taken.local_addr().unwrap().port();

    let err = lifecycle::start(&config).await.err().expect("bind should fail");
    assert!(matches!(err, StartupError::Bind(_)));
}
