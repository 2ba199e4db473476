//! Transport tests against a mocked request manager.

use std::time::Duration;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::{ChatTransport, ErrorKind, RequestEnvelope};

fn envelope(content: &str) -> RequestEnvelope {
    RequestEnvelope::message("ann@example.com", content, "sid-1", "customer-webclient", "ua")
}

fn client_for(server: &MockServer) -> RequestManagerClient {
    RequestManagerClient::new(ClientConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn posts_envelope_with_identity_header() {
    let server = MockServer::start().await;
    let env = envelope("hello");

    Mock::given(method("POST"))
        .and(path("/api/v1/requests/generic"))
        .and(header("x-user-id", "ann@example.com"))
        .and(header("content-type", "application/json"))
        .and(body_json(&env))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {"content": "hi"},
            "session_id": "s1",
            "request_id": "r1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).send(&env).await.unwrap();
    assert_eq!(reply.content, "hi");
    assert_eq!(reply.session_id, "s1");
    assert_eq!(reply.request_id, "r1");
}

#[tokio::test]
async fn flat_content_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": "plain"})),
        )
        .mount(&server)
        .await;

    let reply = client_for(&server).send(&envelope("x")).await.unwrap();
    assert_eq!(reply.content, "plain");
    assert_eq!(reply.session_id, "");
}

#[tokio::test]
async fn server_error_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "boom"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).send(&envelope("x")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Protocol);
    assert_eq!(err.status, Some(500));
    assert!(err.message.contains("boom"));
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream went away"))
        .mount(&server)
        .await;

    let err = client_for(&server).send(&envelope("x")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert!(err.message.contains("upstream went away"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"content": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = RequestManagerClient::new(
        ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let err = client.send(&envelope("x")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop a listener so the port is almost certainly closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RequestManagerClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap();
    let err = client.send(&envelope("x")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.message.contains("try again"));
}

#[test]
fn endpoint_is_precomputed() {
    let client = RequestManagerClient::new(ClientConfig::new("http://rm/")).unwrap();
    assert_eq!(client.endpoint(), "http://rm/api/v1/requests/generic");
}
