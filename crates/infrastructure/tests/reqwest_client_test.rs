//! Integration tests for the reqwest adapter against a local TCP server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use pokecheck_application::{HttpClient, HttpClientError};
use pokecheck_domain::{QueryParams, ResourcePath};
use pokecheck_infrastructure::{ReqwestHttpClient, Settings};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

async fn read_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0_u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// Answers a single request and hands back the request head it received.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: String,
) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let head = read_head(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status}\r\n\
             content-type: {content_type}\r\n\
             content-length: {}\r\n\
             connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        head
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), handle)
}

fn client(base_url: Url, timeout: Duration) -> ReqwestHttpClient {
    ReqwestHttpClient::new(&Settings { base_url, timeout }).unwrap()
}

#[tokio::test]
async fn test_fetch_parses_json_body() {
    let body = json!({"count": 1, "results": [{"name": "stench"}]}).to_string();
    let (base, server) = serve_once("200 OK", "application/json; charset=utf-8", body).await;
    let client = client(base, Duration::from_secs(5));

    let response = client
        .fetch(
            &ResourcePath::new("/api/v2/ability"),
            &QueryParams::new().with("limit", 1),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_json);
    assert_eq!(response.body["results"][0]["name"], "stench");
    assert_eq!(
        response.header("Content-Type"),
        Some("application/json; charset=utf-8")
    );

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /api/v2/ability?limit=1 HTTP/1.1\r\n"), "{head}");
    assert!(head.to_lowercase().contains("accept: application/json"), "{head}");
    assert!(head.to_lowercase().contains("user-agent: pokecheck/"), "{head}");
}

#[tokio::test]
async fn test_plain_text_not_found_is_a_response_not_an_error() {
    let (base, server) = serve_once("404 Not Found", "text/plain", "Not Found".to_string()).await;
    let client = client(base, Duration::from_secs(5));

    let response = client
        .fetch(
            &ResourcePath::new("/api/v2/pokemon/:name").bind("name", "Cubone"),
            &QueryParams::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_json);
    assert_eq!(response.body, serde_json::Value::Null);
    assert_eq!(response.raw_body, "Not Found");

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /api/v2/pokemon/Cubone HTTP/1.1\r\n"), "{head}");
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let client = client(
        Url::parse(&format!("http://{addr}")).unwrap(),
        Duration::from_millis(200),
    );
    let err = client
        .fetch(&ResourcePath::new("/api/v2/ability"), &QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(err, HttpClientError::Timeout { timeout_ms: 200 });
    server.abort();
}

#[tokio::test]
async fn test_closed_port_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(
        Url::parse(&format!("http://{addr}")).unwrap(),
        Duration::from_secs(5),
    );
    let err = client
        .fetch(&ResourcePath::new("/api/v2/ability"), &QueryParams::new())
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
        ),
        "unexpected error: {err:?}"
    );
}
