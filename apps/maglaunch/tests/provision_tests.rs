//! Integration tests for the storage dispatcher client.
//!
//! Uses wiremock to mock the dispatcher's HTTP responses.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use maglaunch::dispatcher::{DispatcherClient, STORAGE_GIB};
use maglaunch::error::LaunchError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_dispatcher(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/provision-storage"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn provision_returns_claim_name() {
    let server = mock_dispatcher(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "pvc-1234"})),
    )
    .await;

    let client = DispatcherClient::new(server.uri(), "test-token").unwrap();
    let claim = client.provision_storage(STORAGE_GIB).await.unwrap();
    assert_eq!(claim, "pvc-1234");
}

#[tokio::test]
async fn provision_sends_token_and_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/provision-storage"))
        .and(header("Authorization", "Latch-Execution-Token test-token"))
        .and(body_json(serde_json::json!({"storage_gib": 100})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "pvc-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "test-token").unwrap();
    client.provision_storage(STORAGE_GIB).await.unwrap();
}

#[tokio::test]
async fn provision_without_claim_field_is_error() {
    let server = mock_dispatcher(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"volume": "pvc-1"})),
    )
    .await;

    let client = DispatcherClient::new(server.uri(), "test-token").unwrap();
    let result = client.provision_storage(STORAGE_GIB).await;
    assert!(matches!(result, Err(LaunchError::MalformedResponse)));
}

#[tokio::test]
async fn token_with_invalid_header_characters_is_rejected() {
    let result = DispatcherClient::new("http://localhost:8080", "bad\ntoken");
    assert!(matches!(result, Err(LaunchError::InvalidToken(_))));
}

#[tokio::test]
async fn provision_http_failure_is_error() {
    let server = mock_dispatcher(ResponseTemplate::new(503)).await;

    let client = DispatcherClient::new(server.uri(), "test-token").unwrap();
    let result = client.provision_storage(STORAGE_GIB).await;
    assert!(matches!(result, Err(LaunchError::Http(_))));
}
