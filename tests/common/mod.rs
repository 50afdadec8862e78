//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use request_firewall::{FirewallConfig, FirewallServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const SHORT: &str = "class.module.classLoader";
pub const PATTERN: &str = "class.module.classLoader.resources.context.parent.pipeline.first.pattern";
pub const SUFFIX: &str = "class.module.classLoader.resources.context.parent.pipeline.first.suffix";

pub const QUERY_BLOCKED: &str = "Blocked by firewall: Suspicious pattern detected in query string.\n";
pub const HEADERS_BLOCKED: &str = "Blocked by firewall: Suspicious pattern detected in headers.\n";
pub const BODY_BLOCKED: &str = "Blocked by firewall: Suspicious pattern detected in POST data.\n";
pub const ALLOWED: &str = "Request allowed.\n";

/// Start a firewall on an ephemeral loopback port.
///
/// The server stops when the returned `Shutdown` is triggered.
#[allow(dead_code)]
pub async fn start_firewall(config: FirewallConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = FirewallServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Send raw bytes over a fresh connection and return the full response.
#[allow(dead_code)]
pub async fn send_raw(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// Send raw bytes, close the write half, and return the full response.
#[allow(dead_code)]
pub async fn send_raw_half_closed(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
