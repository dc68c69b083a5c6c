//! End-to-end bootstrap tests: resolve a real argument vector, start
//! listeners on real sockets, and exercise them over HTTP.

use std::net::TcpListener as StdTcpListener;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use mocks3::cli::Cli;
use mocks3::net::ListenerError;
use mocks3::{config, net, StorageService};

fn resolve(rest: &[String]) -> config::ServerConfig {
    let raw: Vec<String> = std::iter::once("mocks3".to_string())
        .chain(rest.iter().cloned())
        .collect();
    let cli = Cli::parse_from(&raw);
    config::resolve(cli, &raw).unwrap()
}

fn write(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

/// Hold a port open to force a bind conflict.
fn occupy_port() -> (StdTcpListener, u16) {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn plain_listener_serves_requests() {
    let dir = tempfile::tempdir().unwrap();
    let cors = write(dir.path(), "cors.xml", b"<cors/>");

    let config = resolve(&[
        "-d".into(),
        dir.path().to_str().unwrap().into(),
        "-a".into(),
        "127.0.0.1".into(),
        "-p".into(),
        "0".into(),
        "--configure-bucket".into(),
        "test-bucket".into(),
        cors,
    ]);

    let service = StorageService::new(&config).unwrap();
    assert!(dir.path().join("test-bucket").is_dir());

    let running = net::start(&config, &service).await.unwrap();
    assert_ne!(running.primary.port, 0);
    assert!(running.secondary.is_none());

    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!(
        "http://127.0.0.1:{}/test-bucket/key",
        running.primary.port
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn secondary_bind_failure_keeps_primary_serving() {
    let dir = tempfile::tempdir().unwrap();
    let key = write(dir.path(), "key.pem", b"placeholder");
    let cert = write(dir.path(), "cert.pem", b"placeholder");
    let (_guard, occupied) = occupy_port();

    let config = resolve(&[
        "-d".into(),
        dir.path().to_str().unwrap().into(),
        "-a".into(),
        "127.0.0.1".into(),
        "-p".into(),
        "0".into(),
        "--tls-port".into(),
        occupied.to_string(),
        "--key".into(),
        key,
        "--cert".into(),
        cert,
    ]);
    assert!(config.auxiliary_tls.is_some());

    let service = StorageService::new(&config).unwrap();
    let running = net::start(&config, &service).await.unwrap();

    // The occupied TLS port is a warning, not a failure.
    assert!(running.secondary.is_none());

    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!("http://127.0.0.1:{}/", running.primary.port))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn primary_bind_failure_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let (_guard, occupied) = occupy_port();

    let config = resolve(&[
        "-d".into(),
        dir.path().to_str().unwrap().into(),
        "-a".into(),
        "127.0.0.1".into(),
        "-p".into(),
        occupied.to_string(),
    ]);

    let service = StorageService::new(&config).unwrap();
    let err = net::start(&config, &service).await.unwrap_err();
    match err {
        ListenerError::Bind { port, .. } => assert_eq!(port, occupied),
        other => panic!("unexpected error: {other}"),
    }
}
