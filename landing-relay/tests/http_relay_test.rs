#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! `HttpFormRelay` against a local HTTP server.

mod common;

use landing_relay::{FormRelay, FormSubmission, HttpFormRelay, RelayError};

fn contact_submission(endpoint: &str) -> FormSubmission {
    FormSubmission::new(endpoint)
        .field("name", "Ada Lovelace")
        .field("email", "ada+site@example.com")
        .field("message", "Hello & welcome")
}

#[tokio::test]
async fn posts_form_encoded_fields_with_json_accept() {
    let (endpoint, captured) = common::serve_once("200 OK", r#"{"ok":true}"#).await;
    let relay = HttpFormRelay::new();

    let response = relay.submit(&contact_submission(&endpoint)).await.unwrap();
    assert!(response.is_success());

    let request = captured.await.unwrap();
    assert!(request.request_line().starts_with("POST /f/test-form"));
    assert_eq!(request.header("accept").as_deref(), Some("application/json"));
    assert_eq!(
        request.header("content-type").as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert!(request.body.contains("name=Ada+Lovelace"));
    assert!(request.body.contains("email=ada%2Bsite%40example.com"));
    assert!(request.body.contains("message=Hello+%26+welcome"));
}

#[tokio::test]
async fn unprocessable_entity_is_not_a_transport_error() {
    let (endpoint, _captured) = common::serve_once(
        "422 Unprocessable Entity",
        r#"{"errors":[{"field":"email","message":"taken"}]}"#,
    )
    .await;
    let relay = HttpFormRelay::new();

    let response = relay.submit(&contact_submission(&endpoint)).await.unwrap();
    assert_eq!(response.status, 422);
    assert!(!response.is_success());

    let payload = response.error_payload().unwrap().unwrap();
    assert_eq!(payload.errors.len(), 1);
    assert_eq!(payload.errors[0].field.as_deref(), Some("email"));
    assert_eq!(payload.errors[0].message, "taken");
}

#[tokio::test]
async fn connection_refused_maps_to_network_error() {
    let endpoint = common::closed_endpoint().await;
    let relay = HttpFormRelay::new();

    let result = relay.submit(&contact_submission(&endpoint)).await;
    assert!(
        matches!(&result, Err(RelayError::NetworkError { endpoint: e, .. }) if *e == endpoint),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn relative_endpoint_is_rejected_before_sending() {
    let relay = HttpFormRelay::new();
    let result = relay.submit(&contact_submission("/contact")).await;
    assert!(
        matches!(&result, Err(RelayError::InvalidEndpoint { .. })),
        "unexpected result: {result:?}"
    );
}
