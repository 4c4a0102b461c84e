// End-to-end tests through the mounted Rocket application

use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::Value;
use std::sync::Arc;
use wallet_issuer::rocket_with_state;
use wallet_issuer::services::wallet::{IssuanceGate, LocalKeyGenerator};

use crate::test_utils::{bearer, create_simple_test_app_state, create_test_app_state_with};

async fn client() -> Client {
    Client::tracked(rocket_with_state(create_simple_test_app_state()))
        .await
        .expect("valid rocket instance")
}

#[tokio::test]
async fn test_index_is_public() {
    let client = client().await;
    let response = client.get("/").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_issue_wallet_requires_token() {
    let client = client().await;
    let response = client.post("/issue_wallet").dispatch().await;

    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_issue_wallet_end_to_end() {
    let client = client().await;
    let response = client.post("/issue_wallet").header(bearer()).dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.headers().get_one("Cache-Control"), Some("no-store"));

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"]["address"].as_str().unwrap().starts_with("0x"));
    assert!(body["data"]["private_key"].as_str().unwrap().starts_with("0x"));
}

#[tokio::test]
async fn test_gate_status_not_marked_secret() {
    let client = client().await;
    let response = client.get("/issuance_gate").header(bearer()).dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert!(response.headers().get_one("Cache-Control").is_none());

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["state"], "Free");
}

#[tokio::test]
async fn test_closed_gate_returns_503() {
    let gate = IssuanceGate::binary();
    gate.close();
    let state = create_test_app_state_with(gate, Arc::new(LocalKeyGenerator::new()), None);
    let client = Client::tracked(rocket_with_state(state))
        .await
        .expect("valid rocket instance");

    let response = client.post("/issue_wallet").header(bearer()).dispatch().await;
    assert_eq!(response.status(), Status::ServiceUnavailable);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let client = client().await;
    let response = client.get("/openapi.json").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert!(body["paths"]["/issue_wallet"].is_object());
}
